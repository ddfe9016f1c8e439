//! Wire schema shared by the content and file stores.
//!
//! DESIGN
//! ======
//! Text records arrive in a loose shape: the backend may answer with `null`,
//! omit `content`, or send something other than an array for `paragraphs`.
//! [`FetchedContent`] keeps that looseness explicit so fallbacks are applied
//! in one place ([`FetchedContent::resolve`]) rather than by every caller.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// ERRORS
// =============================================================================

/// Every way a backend call can fail. All variants are network failures from
/// the panel's point of view.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The request never produced a response (connect, timeout, transport).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("unexpected response status: {status}")]
    Status { status: u16 },

    /// The response body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

// =============================================================================
// TEXT RECORDS
// =============================================================================

/// A text record as persisted: one title plus an ordered paragraph list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub component: String,
    pub content: String,
    pub paragraphs: Vec<String>,
}

impl ContentRecord {
    /// Build the record sent on save. The title is trimmed and paragraphs are
    /// normalized to a list of trimmed strings.
    #[must_use]
    pub fn for_save(component: &str, title: &str, paragraphs: impl Into<Paragraphs>) -> Self {
        Self {
            component: component.to_owned(),
            content: title.trim().to_owned(),
            paragraphs: paragraphs.into().normalize(),
        }
    }

    /// Paragraphs as displayed: one per line.
    #[must_use]
    pub fn paragraph_text(&self) -> String {
        self.paragraphs.join("\n")
    }
}

/// Paragraph input accepted on save: either a single block of text or an
/// already split list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paragraphs {
    Block(String),
    List(Vec<String>),
}

impl Paragraphs {
    #[must_use]
    pub fn normalize(self) -> Vec<String> {
        match self {
            Self::Block(text) => vec![text.trim().to_owned()],
            Self::List(items) => items.iter().map(|p| p.trim().to_owned()).collect(),
        }
    }
}

impl From<String> for Paragraphs {
    fn from(text: String) -> Self {
        Self::Block(text)
    }
}

impl From<&str> for Paragraphs {
    fn from(text: &str) -> Self {
        Self::Block(text.to_owned())
    }
}

impl From<Vec<String>> for Paragraphs {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// A text record exactly as the backend returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedContent {
    pub content: Option<String>,
    /// `None` when missing, not an array, or holding non-string items.
    pub paragraphs: Option<Vec<String>>,
}

impl FetchedContent {
    /// Interpret a response body. `null` means "no record"; any other
    /// non-object is a record with every field malformed.
    #[must_use]
    pub fn from_json(body: &Value) -> Option<Self> {
        if body.is_null() {
            return None;
        }
        let Some(obj) = body.as_object() else {
            return Some(Self::default());
        };
        let content = obj.get("content").and_then(Value::as_str).map(str::to_owned);
        let paragraphs = obj.get("paragraphs").and_then(Value::as_array).and_then(|items| {
            items
                .iter()
                .map(|v| v.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
        });
        Some(Self { content, paragraphs })
    }

    /// Fill missing or malformed fields with placeholders.
    #[must_use]
    pub fn resolve(self, component: &str, fallback_title: &str, fallback_paragraph: &str) -> ContentRecord {
        let content = self
            .content
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| fallback_title.to_owned());
        let paragraphs = self
            .paragraphs
            .unwrap_or_else(|| vec![fallback_paragraph.to_owned()]);
        ContentRecord { component: component.to_owned(), content, paragraphs }
    }
}

// =============================================================================
// ASSETS
// =============================================================================

/// A binary asset downloaded by title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    pub title: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// A local file chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Backend acknowledgment of an upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadAck {
    pub message: String,
    #[serde(default)]
    pub url: Option<String>,
}
