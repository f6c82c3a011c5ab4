//! Somali news sources known to work, by label.

use crate::extract::DEFAULT_SELECTORS;
use crate::source::{Pagination, RawSource, SourceKind};

/// Somali and English words marking economy headlines on general news listings.
#[rustfmt::skip]
pub const ECONOMY_KEYWORDS: &[&str] = &[
    // Somali
    "dhaqaale", "dhaqaalaha", "dhaqaaleed",
    "ganacsi", "ganacsiga", "ganacsato",
    "sicir", "sicir-barar", "sicirbarar",
    "qiime", "qiimaha",
    "kharash", "miisaaniyad",
    "dakhli", "khasaaro",
    "faa'iido", "faaido",
    "deyn", "dayn",
    "maalgashi", "maalgelin",
    "shirkad", "shirkadaha",
    "saami", "saamiga", "saamiyo",
    "suq", "suuq", "suqyada", "suuqyada",
    "deked", "dhoof", "dhoofin",
    "soo dejin", "soodejin", "soodajin",
    "xawaalad",
    "lacag", "shilin", "doolar",
    "sarif", "sarrif",
    "bangiga", "bangiyada", "bank",
    "shaqo", "shaqo abuur", "mushahar",
    "cashuur", "canshuur", "canshuuraha",
    "shidaal", "batrool", "gaas",
    "koronto", "biil",
    // English, some Somali sites mix it in
    "business", "economy", "economic",
    "finance", "financial",
    "investment", "market",
    "import", "export", "trade",
    "tax", "budget", "revenue",
    "profit", "loss",
];

fn category(name: &str, label: &str, base_url: &str, max_pages: u32) -> RawSource {
    let mut source = RawSource::new(name, label, base_url);
    source.max_pages = max_pages;
    source.selectors = strings(DEFAULT_SELECTORS);
    source
}

fn archive(name: &str, base_url: &str, selectors: &[&str]) -> RawSource {
    let mut source = RawSource::new(name, "Economy", base_url);
    source.kind = SourceKind::KeywordArchive;
    source.max_pages = 300_000;
    source.selectors = strings(selectors);
    source.keywords = strings(ECONOMY_KEYWORDS);
    source
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// The default sources, in crawl order within each label.
pub fn builtin_sources() -> Vec<RawSource> {
    let archive_selectors = [DEFAULT_SELECTORS, &["article h2 a", "article h3 a"]].concat();

    let mut hiiraan = archive(
        "Hiiraan",
        "https://www.hiiraan.com/wararkamaanta.php?page=",
        &["h1 a", "h2 a", "h3 a", "h4 a"],
    );
    hiiraan.pagination = Pagination::QueryParam.to_string();

    let mut somalilandtoday = category(
        "Somalilandtoday",
        "Economy",
        "https://somalilandtoday.com/category/news/",
        200_000,
    );
    somalilandtoday.selectors = strings(&[
        "h1 a",
        "h2 a",
        "h3 a",
        "h4 a",
        ".entry-title a",
        ".post-title a",
    ]);
    somalilandtoday.keywords = strings(ECONOMY_KEYWORDS);
    somalilandtoday.use_keyword_filter = true;

    // The category already implies the topic, a single listing page exists.
    let mut wikipedia = archive(
        "SomaliWikipedia",
        "https://so.wikipedia.org/w/index.php?title=Category:Dhaqaale&page=",
        &["#mw-pages a"],
    );
    wikipedia.pagination = Pagination::QueryParam.to_string();
    wikipedia.max_pages = 1;
    wikipedia.keywords.clear();

    vec![
        category("Caasimada", "Politics", "https://www.caasimada.net/category/wararka/", 200_000),
        category("Caasimada", "World", "https://www.caasimada.net/category/caalamka/", 200_000),
        category(
            "Kooxda",
            "Sports",
            "https://kooxda.com/category/wararka-ciyaaraha-maanta/",
            200_000,
        ),
        category("Goobjoog", "Sports", "https://goobjoog.com/qayb/cayaaraha/", 100_000),
        category("Goobjoog", "Economy", "https://goobjoog.com/qayb/dhaqaale/", 100_000),
        archive("RadioMuqdisho", "https://radiomuqdisho.so/category/wararka/", &archive_selectors),
        archive("RadioWaamo", "https://radiowaamo.so/category/wararka/", &archive_selectors),
        hiiraan,
        somalilandtoday,
        wikipedia,
    ]
}
