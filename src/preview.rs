//! Process-local preview handles for downloaded or uploaded image bytes.
//!
//! DESIGN
//! ======
//! A [`PreviewHandle`] is the only way to keep an entry alive in the
//! [`PreviewRegistry`]. Handles are reference counted: clones share one
//! entry, and the entry is revoked when the last clone drops. A slot that
//! takes a new handle therefore releases the old one just by letting it go,
//! and an unmounted panel releases everything by dropping its slots.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;
use uuid::Uuid;

const URL_PREFIX: &str = "blob:panels/";

/// Bytes and MIME type behind a live preview URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewData {
    pub bytes: Arc<[u8]>,
    pub mime_type: String,
}

/// Registry of live preview entries. Cloning shares the registry.
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    entries: Arc<Mutex<HashMap<Uuid, PreviewData>>>,
}

impl PreviewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` and return the handle that keeps them resolvable.
    pub fn create(&self, bytes: impl Into<Arc<[u8]>>, mime_type: impl Into<String>) -> PreviewHandle {
        let id = Uuid::new_v4();
        let data = PreviewData { bytes: bytes.into(), mime_type: mime_type.into() };
        trace!(%id, size = data.bytes.len(), "preview created");
        self.entries().insert(id, data);
        PreviewHandle {
            inner: Arc::new(HandleInner { id, url: format!("{URL_PREFIX}{id}"), registry: self.clone() }),
        }
    }

    /// Look up the data behind a preview URL. `None` once revoked.
    #[must_use]
    pub fn resolve(&self, url: &str) -> Option<PreviewData> {
        let id = url.strip_prefix(URL_PREFIX)?;
        let id = Uuid::parse_str(id).ok()?;
        self.entries().get(&id).cloned()
    }

    /// Number of entries not yet revoked.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries().len()
    }

    fn revoke(&self, id: Uuid) {
        if self.entries().remove(&id).is_some() {
            trace!(%id, "preview revoked");
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<Uuid, PreviewData>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for PreviewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewRegistry").field("live", &self.live_count()).finish()
    }
}

/// Shared ownership of one registry entry.
#[derive(Clone)]
pub struct PreviewHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    id: Uuid,
    url: String,
    registry: PreviewRegistry,
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        self.registry.revoke(self.id);
    }
}

impl PreviewHandle {
    /// URL a renderer can use as an image source.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Whether both handles refer to the same entry.
    #[must_use]
    pub fn same_entry(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PreviewHandle").field(&self.inner.url).finish()
    }
}
