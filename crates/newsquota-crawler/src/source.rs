use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::extract::DEFAULT_SELECTORS;
use crate::normalize::normalize;

/// A source as written in configuration, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSource {
    pub name: String,

    pub label: String,

    #[serde(default)]
    pub kind: SourceKind,

    pub base_url: String,

    /// Either `offset-path` or `query-param`, checked at validation time
    #[serde(default = "default_pagination")]
    pub pagination: String,

    #[serde(default = "default_start_page")]
    pub start_page: u32,

    /// Last page index that may be requested
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    #[serde(default)]
    pub selectors: Vec<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    /// Apply the keyword filter even on a category source
    #[serde(default)]
    pub use_keyword_filter: bool,
}

fn default_pagination() -> String {
    Pagination::OffsetPath.to_string()
}

fn default_start_page() -> u32 {
    1
}

fn default_max_pages() -> u32 {
    100_000
}

impl RawSource {
    pub fn new(name: &str, label: &str, base_url: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: SourceKind::default(),
            base_url: base_url.to_string(),
            pagination: default_pagination(),
            start_page: default_start_page(),
            max_pages: default_max_pages(),
            selectors: vec![],
            keywords: vec![],
            use_keyword_filter: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// A listing that only holds items of the source's label
    #[default]
    #[serde(alias = "wp_category")]
    Category,
    /// A general listing from which on-topic items are picked by keywords
    #[serde(alias = "keyword_archive")]
    KeywordArchive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// `base/` for the first page then `base/page/N/`
    OffsetPath,
    /// The page index appended to a base ending with a query assignment
    QueryParam,
}

impl FromStr for Pagination {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offset-path" | "wp" => Ok(Self::OffsetPath),
            "query-param" | "param" => Ok(Self::QueryParam),
            _ => Err(ConfigError::UnsupportedScheme(s.to_string())),
        }
    }
}

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffsetPath => write!(f, "offset-path"),
            Self::QueryParam => write!(f, "query-param"),
        }
    }
}

impl Pagination {
    pub fn address_for(&self, base: &str, page: u32) -> String {
        match self {
            Self::OffsetPath => {
                let base = format!("{}/", base.trim_end_matches('/'));
                if page == 1 {
                    base
                } else {
                    format!("{base}page/{page}/")
                }
            }
            Self::QueryParam => format!("{base}{page}"),
        }
    }
}

/// Page address for a scheme given by name.
pub fn address_for(base: &str, scheme: &str, page: u32) -> Result<String, ConfigError> {
    Ok(scheme.parse::<Pagination>()?.address_for(base, page))
}

/// A validated source, ready to be crawled.
#[derive(Debug, Clone)]
pub struct Source {
    pub name: String,
    pub label: String,
    pub pagination: Pagination,
    pub base_url: String,
    pub start_page: u32,
    pub max_pages: u32,
    pub selector: Selector,
    /// Normalized keywords
    pub keywords: Vec<String>,
    pub requires_topic_filter: bool,
}

impl Source {
    pub fn page_url(&self, page: u32) -> String {
        self.pagination.address_for(&self.base_url, page)
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start_page..=self.max_pages
    }

    /// Keywords a title must match, `None` when every title is on-topic.
    pub fn topic_keywords(&self) -> Option<&[String]> {
        if self.requires_topic_filter && !self.keywords.is_empty() {
            Some(&self.keywords)
        } else {
            None
        }
    }
}

impl TryFrom<RawSource> for Source {
    type Error = ConfigError;

    fn try_from(raw: RawSource) -> Result<Self, Self::Error> {
        if raw.name.trim().is_empty() {
            return Err(ConfigError::MissingField("name"));
        }
        if raw.label.trim().is_empty() {
            return Err(ConfigError::MissingField("label"));
        }

        let pagination = raw.pagination.parse::<Pagination>()?;

        if reqwest::Url::parse(&raw.base_url).is_err() {
            return Err(ConfigError::InvalidBaseUrl {
                source_name: raw.name,
                url: raw.base_url,
            });
        }

        if raw.start_page > raw.max_pages {
            return Err(ConfigError::EmptyPageRange {
                source_name: raw.name,
                start: raw.start_page,
                max: raw.max_pages,
            });
        }

        let css = if raw.selectors.is_empty() {
            DEFAULT_SELECTORS.join(", ")
        } else {
            for s in &raw.selectors {
                Selector::parse(s).map_err(|e| ConfigError::InvalidSelector {
                    source_name: raw.name.clone(),
                    selector: s.clone(),
                    reason: e.to_string(),
                })?;
            }
            raw.selectors.join(", ")
        };
        let selector = Selector::parse(&css).map_err(|e| ConfigError::InvalidSelector {
            source_name: raw.name.clone(),
            selector: css.clone(),
            reason: e.to_string(),
        })?;

        let keywords = raw
            .keywords
            .iter()
            .map(|k| normalize(k))
            .filter(|k| !k.is_empty())
            .collect();

        Ok(Self {
            requires_topic_filter: raw.kind == SourceKind::KeywordArchive || raw.use_keyword_filter,
            name: raw.name,
            label: raw.label.trim().to_string(),
            pagination,
            base_url: raw.base_url,
            start_page: raw.start_page,
            max_pages: raw.max_pages,
            selector,
            keywords,
        })
    }
}

/// Validates every source, logging and discarding the invalid ones.
pub fn validate_sources(raw: Vec<RawSource>) -> (Vec<Source>, Vec<(String, ConfigError)>) {
    let mut valid = vec![];
    let mut invalid = vec![];
    for r in raw {
        let name = format!("{} - {}", r.name, r.label);
        match Source::try_from(r) {
            Ok(source) => valid.push(source),
            Err(e) => {
                log::error!("Ignoring source [{name}]: {e}");
                invalid.push((name, e));
            }
        }
    }
    (valid, invalid)
}
