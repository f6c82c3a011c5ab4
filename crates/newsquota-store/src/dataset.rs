use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub const TEXT_COLUMN: &str = "text";
pub const LABEL_COLUMN: &str = "label";
pub const SOURCE_COLUMN: &str = "source";
pub const URL_COLUMN: &str = "url";

/// Rows whose trimmed text has at most this many characters are dropped at load.
pub const MIN_TEXT_CHARS: usize = 5;

const BOM: char = '\u{feff}';

/// One labeled row of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub text: String,
    pub label: String,
    pub source: String,
    pub url: String,
}

impl Record {
    pub fn new(
        text: impl Into<String>,
        label: impl Into<String>,
        source: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            source: source.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Loads a CSV dataset, keeping only the `text`, `label`, `source` and `url`
    /// columns. The two first ones are required, the others default to empty.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let file = fs_err::File::open(path)?;
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let headers = rdr.headers()?.clone();
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches(BOM).trim() == name)
        };
        let missing = |column| StoreError::MissingColumn {
            column,
            path: path.to_path_buf(),
        };

        let text_idx = position(TEXT_COLUMN).ok_or_else(|| missing(TEXT_COLUMN))?;
        let label_idx = position(LABEL_COLUMN).ok_or_else(|| missing(LABEL_COLUMN))?;
        let source_idx = position(SOURCE_COLUMN);
        let url_idx = position(URL_COLUMN);

        let mut records = vec![];
        let mut dropped = 0;
        for row in rdr.records() {
            let row = row?;
            let field = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or_default();

            let text = field(Some(text_idx)).trim();
            let label = field(Some(label_idx)).trim();
            if text.is_empty() || label.is_empty() || text.chars().count() <= MIN_TEXT_CHARS {
                dropped += 1;
                continue;
            }

            records.push(Record::new(text, label, field(source_idx), field(url_idx)));
        }

        if dropped > 0 {
            log::info!("Dropped {dropped} unusable rows from {}", path.display());
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn extend<I: IntoIterator<Item = Record>>(&mut self, records: I) {
        self.records.extend(records)
    }

    pub fn count(&self, label: &str) -> usize {
        self.records.iter().filter(|r| r.label == label).count()
    }

    pub fn label_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.records {
            *counts.entry(r.label.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Label counts, most frequent first, ties broken by label name.
    pub fn distribution(&self) -> Vec<(String, usize)> {
        let mut dist = self
            .label_counts()
            .into_iter()
            .map(|(label, n)| (label.to_string(), n))
            .collect::<Vec<_>>();
        dist.sort_by(|(l1, n1), (l2, n2)| n2.cmp(n1).then_with(|| l1.cmp(l2)));
        dist
    }

    /// Keeps the first record of every group sharing the same text key and
    /// returns the number of removed records.
    pub fn dedup_by_text_key<K, F>(&mut self, mut key: F) -> usize
    where
        K: Eq + Hash,
        F: FnMut(&str) -> K,
    {
        let before = self.records.len();
        let mut seen = HashSet::with_capacity(before);
        self.records.retain(|r| seen.insert(key(&r.text)));
        before - self.records.len()
    }
}
