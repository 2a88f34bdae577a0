//! Title page fetching
//!
//! Used when a caller asks for resolution by address only, without
//! attaching an HTML snapshot of its own.

use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid page url: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("http status {0}")]
    Http(u16),
}

/// HTTP client for pulling title page HTML
pub struct PageFetcher {
    http: Client,
}

impl PageFetcher {
    pub fn new(user_agent: &str, timeout_ms: u64) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(user_agent)
            .gzip(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { http }
    }

    /// Fetch a title page and return its HTML body
    pub async fn fetch(&self, address: &str) -> Result<String, FetchError> {
        let url = Url::parse(address).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }

        debug!("Fetching title page: {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}
