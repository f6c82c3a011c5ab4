#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use newsquota_crawler::{FetchOutcome, PageFetcher, RawSource, ScrapeConfig, Source};

/// Serves canned pages, answers 404 for unknown urls and records every request.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: HashMap<String, FetchOutcome>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, titles: &[String]) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchOutcome::Response {
                status: 200,
                body: listing(titles),
            },
        );
        self
    }

    pub fn outcome(mut self, url: &str, outcome: FetchOutcome) -> Self {
        self.pages.insert(url.to_string(), outcome);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .unwrap_or(FetchOutcome::Response {
                status: 404,
                body: String::new(),
            })
    }
}

/// Every request fails before reaching a server.
pub struct Unreachable;

#[async_trait::async_trait]
impl PageFetcher for Unreachable {
    async fn fetch(&self, _url: &str) -> FetchOutcome {
        FetchOutcome::TransportFailure("dns error".into())
    }
}

pub fn listing(titles: &[String]) -> String {
    let mut html = String::from("<html><body>");
    for (i, title) in titles.iter().enumerate() {
        html.push_str(&format!(
            r#"<article><h2 class="entry-title"><a href="https://news.so/{i}">{title}</a></h2></article>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

pub fn titles(prefix: &str, range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("{prefix} headline number {i}")).collect()
}

pub fn quiet_config(target: usize) -> ScrapeConfig {
    ScrapeConfig {
        target_per_label: target,
        sleep_min: 0.0,
        sleep_max: 0.0,
        ..Default::default()
    }
}

pub fn source(name: &str, label: &str, base_url: &str) -> Source {
    Source::try_from(RawSource::new(name, label, base_url)).unwrap()
}
