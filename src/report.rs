use std::path::Path;

use newsquota_crawler::store::Dataset;
use newsquota_crawler::{NeedMap, RunReport, Source};

pub fn distribution(title: &str, dataset: &Dataset) {
    println!("\n{title}:");
    for (label, count) in dataset.distribution() {
        println!("  {label:<12} {count:>7}");
    }
    println!("  {:<12} {:>7}", "total", dataset.len());
}

pub fn need(need: &NeedMap) {
    println!("\nNeed:");
    for (label, n) in need.iter() {
        println!("  {label:<12} {n:>7}");
    }
}

pub fn sources(run: &RunReport) {
    if run.labels.is_empty() {
        return;
    }
    println!("\nSources:");
    for label in &run.labels {
        println!("  {} (+{}/{})", label.label, label.added, label.need);
        for source in &label.sources {
            println!(
                "    {:<16} +{:<6} {:>6} pages  {}",
                source.name, source.added, source.pages_visited, source.stop
            );
        }
    }
}

pub fn summary(output: &Path, dataset: &Dataset, run: &RunReport) {
    println!("\nSaved: {}", output.display());
    println!("Total rows: {}", dataset.len());
    if run.duplicates_removed > 0 {
        println!("Duplicates removed: {}", run.duplicates_removed);
    }
    if run.unmet.is_satisfied() {
        return;
    }
    println!("Still missing:");
    for (label, n) in run.unmet.unmet() {
        println!("  {label:<12} {n:>7}");
    }
}

pub fn catalog(sources: &[Source]) {
    for source in sources {
        let filter = match source.topic_keywords() {
            Some(keywords) => format!("{} keywords", keywords.len()),
            None => "-".to_string(),
        };
        println!(
            "{:<16} {:<9} {:<12} pages {}..={}  {:<10} {}",
            source.name,
            source.label,
            source.pagination.to_string(),
            source.start_page,
            source.max_pages,
            filter,
            source.base_url,
        );
    }
}
