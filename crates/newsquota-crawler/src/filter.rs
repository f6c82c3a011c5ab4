use std::collections::HashSet;

use crate::extract::CandidateItem;
use crate::normalize::normalize;
use crate::source::Source;

/// Normalized texts already present in the dataset or admitted during the run.
#[derive(Debug, Clone, Default)]
pub struct NormalizedSet(HashSet<String>);

impl NormalizedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, normalized: &str) -> bool {
        self.0.contains(normalized)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for NormalizedSet {
    fn from_iter<I: IntoIterator<Item = S>>(texts: I) -> Self {
        Self(texts.into_iter().map(|t| normalize(t.as_ref())).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Admitted,
    Duplicate,
    OffTopic,
}

/// Decides whether `item` joins the dataset. The duplicate check always runs
/// first and only admitted titles are added to `seen`.
pub fn screen(item: &CandidateItem, seen: &mut NormalizedSet, source: &Source) -> Verdict {
    let title = normalize(&item.title);
    if seen.contains(&title) {
        return Verdict::Duplicate;
    }

    if let Some(keywords) = source.topic_keywords() {
        if !keywords.iter().any(|k| title.contains(k.as_str())) {
            return Verdict::OffTopic;
        }
    }

    seen.0.insert(title);
    Verdict::Admitted
}

pub fn admit(item: &CandidateItem, seen: &mut NormalizedSet, source: &Source) -> bool {
    screen(item, seen, source) == Verdict::Admitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RawSource, SourceKind};

    fn item(title: &str) -> CandidateItem {
        CandidateItem {
            title: title.to_string(),
            link: String::new(),
        }
    }

    fn archive(keywords: &[&str]) -> Source {
        let mut raw = RawSource::new("RadioWaamo", "Economy", "https://radiowaamo.so/");
        raw.kind = SourceKind::KeywordArchive;
        raw.keywords = keywords.iter().map(|k| k.to_string()).collect();
        Source::try_from(raw).unwrap()
    }

    #[test]
    fn keyword_substring_gate() {
        let source = archive(&["Economy", "trade"]);
        let mut seen = NormalizedSet::new();

        assert!(admit(&item("New TRADE deal signed"), &mut seen, &source));
        assert!(!admit(&item("Football match results"), &mut seen, &source));
        assert_eq!(1, seen.len());
        assert!(seen.contains("new trade deal signed"));
    }

    #[test]
    fn duplicates_are_checked_before_topic() {
        let source = archive(&["trade"]);
        let mut seen: NormalizedSet = ["Football   match results"].into_iter().collect();

        assert_eq!(
            Verdict::Duplicate,
            screen(&item("football match RESULTS"), &mut seen, &source)
        );
        assert_eq!(
            Verdict::OffTopic,
            screen(&item("Basketball match results"), &mut seen, &source)
        );
        assert_eq!(1, seen.len());
    }

    #[test]
    fn empty_keyword_list_admits_everything_new() {
        let source = archive(&[]);
        let mut seen = NormalizedSet::new();

        assert!(admit(&item("Football match results"), &mut seen, &source));
        assert!(!admit(&item("Football match results"), &mut seen, &source));
    }
}
