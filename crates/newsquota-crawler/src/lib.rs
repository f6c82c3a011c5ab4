mod catalog;
mod checkpoint;
mod config;
mod error;
mod extract;
mod fetch;
mod filter;
mod harvester;
mod normalize;
mod policy;
mod quota;
mod source;

pub use catalog::{builtin_sources, ECONOMY_KEYWORDS};
pub use checkpoint::Checkpointer;
pub use config::ScrapeConfig;
pub use error::ConfigError;
pub use extract::{extract_items, fetch_and_extract, CandidateItem, PageOutcome, DEFAULT_SELECTORS};
pub use fetch::{FetchOutcome, HttpFetcher, PageFetcher};
pub use filter::{admit, screen, NormalizedSet, Verdict};
pub use harvester::{Harvester, LabelReport, RunReport, SourceReport};
pub use normalize::normalize;
pub use policy::{Flow, PageEvent, StopReason, StoppingPolicy};
pub use quota::{compute_need, NeedMap};
pub use source::{address_for, validate_sources, Pagination, RawSource, Source, SourceKind};

pub use newsquota_store as store;
