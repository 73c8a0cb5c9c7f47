//! Page retrieval for configured sources.
//!
//! [`HttpFetcher`] sends one GET per source with a fixed browser-like
//! `User-Agent` (some news sites reject unknown clients outright) and a
//! bounded timeout. Non-success statuses are errors. Nothing is retried.

use crate::config::SourceConfig;
use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Client identity sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Upper bound for one request, connect to last body byte.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves the raw HTML of a source page.
pub trait PageFetcher {
    async fn fetch(&self, source: &SourceConfig) -> Result<String, FetchError>;
}

/// [`PageFetcher`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> reqwest::Result<Self> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(source = %source.name, url = %source.url))]
    async fn fetch(&self, source: &SourceConfig) -> Result<String, FetchError> {
        let url = Url::parse(&source.url).map_err(|cause| FetchError::InvalidUrl {
            source_name: source.name.clone(),
            url: source.url.clone(),
            cause,
        })?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&source.name, &source.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                source_name: source.name.clone(),
                url: source.url.clone(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(&source.name, &source.url, e))?;
        debug!(bytes = body.len(), %status, "Fetched source page");
        Ok(body)
    }
}
