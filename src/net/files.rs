//! Asset store: binary download and multipart upload by title.

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use super::http_client;
use super::types::{AssetRecord, NetworkError, UploadAck, UploadFile};
use crate::config::ApiConfig;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Downloads and replaces binary assets keyed by title.
#[async_trait::async_trait]
pub trait FileStore: Send + Sync {
    async fn fetch_by_title(&self, title: &str) -> Result<AssetRecord, NetworkError>;

    /// Upload `file` as the new asset for `title`.
    async fn upload(&self, title: &str, file: &UploadFile) -> Result<UploadAck, NetworkError>;
}

/// [`FileStore`] backed by the REST file endpoint.
pub struct HttpFileStore {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpFileStore {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, NetworkError> {
        Ok(Self::with_client(http_client(config.timeouts)?, config))
    }

    #[must_use]
    pub fn with_client(http: reqwest::Client, config: &ApiConfig) -> Self {
        Self { http, config: config.clone() }
    }
}

#[async_trait::async_trait]
impl FileStore for HttpFileStore {
    async fn fetch_by_title(&self, title: &str) -> Result<AssetRecord, NetworkError> {
        let url = self.config.file_url(title);
        debug!(%title, %url, "fetching asset");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| NetworkError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status { status: status.as_u16() });
        }

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(FALLBACK_MIME_TYPE)
            .to_owned();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| NetworkError::Decode(e.to_string()))?;

        Ok(AssetRecord { title: title.to_owned(), bytes: bytes.to_vec(), mime_type })
    }

    async fn upload(&self, title: &str, file: &UploadFile) -> Result<UploadAck, NetworkError> {
        let url = self.config.file_url(title);
        debug!(%title, file = %file.file_name, size = file.bytes.len(), "uploading asset");
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| NetworkError::Request(e.to_string()))?;
        let form = Form::new().part("file", part).text("title", title.to_owned());

        let response = self
            .http
            .put(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| NetworkError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status { status: status.as_u16() });
        }
        response
            .json::<UploadAck>()
            .await
            .map_err(|e| NetworkError::Decode(e.to_string()))
    }
}
