use std::collections::HashSet;

use scraper::{Html, Selector};

use crate::fetch::{FetchOutcome, PageFetcher};

/// Selectors used by sources that do not configure any.
pub const DEFAULT_SELECTORS: &[&str] = &["h1 a", "h2 a", "h3 a", ".entry-title a", ".post-title a"];

/// A (title, link) pair found on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateItem {
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page could not be downloaded at all
    TransportFailure(String),
    /// The server answered with something else than 200
    NonSuccess(u16),
    /// Items extracted from a 200 page, possibly none
    Extracted(Vec<CandidateItem>),
}

/// Collects the elements matching `selector` in document order. Titles shorter
/// than `min_len` characters are skipped, as are repeated (title, link) pairs.
pub fn extract_items(page: &str, selector: &Selector, min_len: usize) -> Vec<CandidateItem> {
    let document = Html::parse_document(page);

    let mut seen = HashSet::new();
    let mut items = vec![];
    for elem in document.select(selector) {
        let title = elem
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if title.is_empty() || title.chars().count() < min_len {
            continue;
        }

        let link = elem.value().attr("href").unwrap_or_default().trim();
        let item = CandidateItem {
            title,
            link: link.to_string(),
        };
        if seen.insert(item.clone()) {
            items.push(item);
        }
    }

    items
}

pub async fn fetch_and_extract<F>(
    fetcher: &F,
    url: &str,
    selector: &Selector,
    min_len: usize,
) -> PageOutcome
where
    F: PageFetcher + ?Sized,
{
    match fetcher.fetch(url).await {
        FetchOutcome::TransportFailure(e) => PageOutcome::TransportFailure(e),
        FetchOutcome::Response { status, .. } if status != 200 => PageOutcome::NonSuccess(status),
        FetchOutcome::Response { body, .. } => {
            PageOutcome::Extracted(extract_items(&body, selector, min_len))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
<html><body>
  <h1><a href="/">Home</a></h1>
  <article>
    <h2 class="entry-title"><a href=" https://x.so/1 ">  Wasiirka   <b>dhaqaalaha</b> oo shir qabtay </a></h2>
  </article>
  <article>
    <h2 class="entry-title"><a href="https://x.so/2">Kooxda Mogadishu City oo guuleysatay</a></h2>
  </article>
  <aside>
    <h3><a href="https://x.so/1">Wasiirka dhaqaalaha oo shir qabtay</a></h3>
    <h3><a>Title without any link target</a></h3>
  </aside>
</body></html>
"#;

    fn selector(css: &str) -> Selector {
        Selector::parse(css).unwrap()
    }

    #[test]
    fn extracts_titles_and_links_in_document_order() {
        let items = extract_items(LISTING, &selector(&DEFAULT_SELECTORS.join(", ")), 12);

        assert_eq!(
            vec![
                CandidateItem {
                    title: "Wasiirka dhaqaalaha oo shir qabtay".into(),
                    link: "https://x.so/1".into()
                },
                CandidateItem {
                    title: "Kooxda Mogadishu City oo guuleysatay".into(),
                    link: "https://x.so/2".into()
                },
                CandidateItem {
                    title: "Title without any link target".into(),
                    link: "".into()
                },
            ],
            items
        );
    }

    #[test]
    fn nested_selectors_do_not_duplicate_items() {
        let items = extract_items(LISTING, &selector("article h2 a, .entry-title a"), 0);
        assert_eq!(2, items.len());
    }

    #[test]
    fn short_titles_are_dropped() {
        let items = extract_items(LISTING, &selector("h1 a"), 5);
        assert!(items.is_empty());

        let items = extract_items(LISTING, &selector("h1 a"), 4);
        assert_eq!(1, items.len());
    }
}
