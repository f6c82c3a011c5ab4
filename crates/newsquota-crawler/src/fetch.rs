use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::ScrapeConfig;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Response { status: u16, body: String },
    /// DNS, connection, timeout or body read failure
    TransportFailure(String),
}

/// Downloads one page, exactly once.
#[async_trait]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ConfigError::InvalidHeader(name.as_str().to_string()))?;
            headers.insert(name, value);
        }

        let client = reqwest::ClientBuilder::new()
            .gzip(true)
            .deflate(true)
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => return FetchOutcome::TransportFailure(e.to_string()),
        };

        let status = resp.status().as_u16();
        if status != 200 {
            return FetchOutcome::Response {
                status,
                body: String::new(),
            };
        }

        match resp.text().await {
            Ok(body) => FetchOutcome::Response { status, body },
            Err(e) => FetchOutcome::TransportFailure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_headers() {
        let mut config = ScrapeConfig::default();
        config
            .headers
            .insert("Bad Header".to_string(), "value".to_string());

        let err = HttpFetcher::new(&config).unwrap_err();
        assert_eq!(
            Some(&ConfigError::InvalidHeader("Bad Header".into())),
            err.downcast_ref::<ConfigError>()
        );
    }
}
