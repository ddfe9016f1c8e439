//! Networking modules for the content backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `content` reads and writes text records, `files` downloads and uploads
//! image assets, and `types` defines the shared wire schema and error type.

pub mod content;
pub mod files;
pub mod types;

use std::time::Duration;

use crate::config::ApiTimeouts;
use types::NetworkError;

/// Build the HTTP client shared by the store implementations.
pub(crate) fn http_client(timeouts: ApiTimeouts) -> Result<reqwest::Client, NetworkError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| NetworkError::ClientBuild(e.to_string()))
}
