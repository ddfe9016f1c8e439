//! Text record store: `GET`/`PUT` on the text endpoint.
//!
//! ERROR HANDLING
//! ==============
//! Every failure comes back as a [`NetworkError`]; callers decide how to
//! surface it. Nothing here retries.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use serde_json::Value;
use tracing::debug;

use super::http_client;
use super::types::{ContentRecord, FetchedContent, NetworkError};
use crate::config::ApiConfig;

/// Reads and writes text records keyed by component identifier.
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch the record for `component`. `Ok(None)` means the backend has
    /// nothing usable for it yet.
    async fn fetch(&self, component: &str) -> Result<Option<FetchedContent>, NetworkError>;

    /// Persist `record`, replacing whatever the backend holds for its
    /// component.
    async fn save(&self, record: &ContentRecord) -> Result<(), NetworkError>;
}

/// [`ContentStore`] backed by the REST text endpoint.
pub struct HttpContentStore {
    http: reqwest::Client,
    url: String,
}

impl HttpContentStore {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, NetworkError> {
        Ok(Self::with_client(http_client(config.timeouts)?, config))
    }

    #[must_use]
    pub fn with_client(http: reqwest::Client, config: &ApiConfig) -> Self {
        Self { http, url: config.text_url() }
    }
}

#[async_trait::async_trait]
impl ContentStore for HttpContentStore {
    async fn fetch(&self, component: &str) -> Result<Option<FetchedContent>, NetworkError> {
        debug!(%component, url = %self.url, "fetching text record");
        let response = self
            .http
            .get(&self.url)
            .query(&[("component", component)])
            .send()
            .await
            .map_err(|e| NetworkError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status { status: status.as_u16() });
        }

        let text = response
            .text()
            .await
            .map_err(|e| NetworkError::Decode(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        let body: Value = serde_json::from_str(&text).map_err(|e| NetworkError::Decode(e.to_string()))?;
        Ok(FetchedContent::from_json(&body))
    }

    async fn save(&self, record: &ContentRecord) -> Result<(), NetworkError> {
        debug!(component = %record.component, paragraphs = record.paragraphs.len(), "saving text record");
        let response = self
            .http
            .put(&self.url)
            .json(record)
            .send()
            .await
            .map_err(|e| NetworkError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status { status: status.as_u16() });
        }
        Ok(())
    }
}
