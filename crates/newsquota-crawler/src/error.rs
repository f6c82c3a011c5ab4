/// Configuration problems, detected once at startup before any page is fetched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported pagination scheme: {0:?}")]
    UnsupportedScheme(String),

    #[error("Source {source_name:?}: invalid selector {selector:?}: {reason}")]
    InvalidSelector {
        source_name: String,
        selector: String,
        reason: String,
    },

    #[error("Source {source_name:?}: invalid base url {url:?}")]
    InvalidBaseUrl { source_name: String, url: String },

    #[error("Source {source_name:?}: start page {start} is after max page {max}")]
    EmptyPageRange {
        source_name: String,
        start: u32,
        max: u32,
    },

    #[error("Source is missing a {0}")]
    MissingField(&'static str),

    #[error("Invalid politeness delay range [{min}, {max}]")]
    InvalidDelay { min: f64, max: f64 },

    #[error("Setting {0} must be greater than zero")]
    ZeroSetting(&'static str),

    #[error("Invalid request header {0:?}")]
    InvalidHeader(String),
}
