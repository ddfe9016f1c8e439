//! Backend endpoint configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TEXT_PATH: &str = "/api/text";
pub const DEFAULT_FILE_PATH: &str = "/files/{title}";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const TITLE_PLACEHOLDER: &str = "{title}";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The base URL is empty after trimming.
    #[error("API base URL must not be empty")]
    EmptyBaseUrl,

    /// The file path template cannot address a single asset.
    #[error("file path template must contain {{title}}: {0}")]
    MissingTitlePlaceholder(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ApiTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

/// Base URL plus per-operation path templates for the content backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Path for text records; fetched with `?component=` and saved with `PUT`.
    pub text_path: String,
    /// Path template for assets; `{title}` is replaced by the asset title.
    pub file_path: String,
    pub timeouts: ApiTimeouts,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            text_path: DEFAULT_TEXT_PATH.to_owned(),
            file_path: DEFAULT_FILE_PATH.to_owned(),
            timeouts: ApiTimeouts::default(),
        }
    }
}

impl ApiConfig {
    /// Default paths against the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBaseUrl`] if `base_url` is blank.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Self::default().with_base_url(base_url)
    }

    /// Build typed API config from environment variables.
    ///
    /// Optional:
    /// - `PANELS_API_BASE_URL`: default `http://localhost:3000`
    /// - `PANELS_TEXT_PATH`: default `/api/text`
    /// - `PANELS_FILE_PATH`: default `/files/{title}`
    /// - `PANELS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `PANELS_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is blank or the file path template
    /// has no `{title}` placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("PANELS_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        let text_path = std::env::var("PANELS_TEXT_PATH").unwrap_or_else(|_| DEFAULT_TEXT_PATH.to_owned());
        let file_path = std::env::var("PANELS_FILE_PATH").unwrap_or_else(|_| DEFAULT_FILE_PATH.to_owned());
        let timeouts = ApiTimeouts {
            request_secs: env_parse_u64("PANELS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("PANELS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        if !file_path.contains(TITLE_PLACEHOLDER) {
            return Err(ConfigError::MissingTitlePlaceholder(file_path));
        }

        Self { base_url: String::new(), text_path, file_path, timeouts }.with_base_url(&base_url)
    }

    /// Replace the base URL, dropping any trailing `/`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBaseUrl`] if `base_url` is blank.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        trimmed.clone_into(&mut self.base_url);
        Ok(self)
    }

    #[must_use]
    pub fn text_url(&self) -> String {
        format!("{}{}", self.base_url, self.text_path)
    }

    #[must_use]
    pub fn file_url(&self, title: &str) -> String {
        format!("{}{}", self.base_url, self.file_path.replace(TITLE_PLACEHOLDER, title))
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
