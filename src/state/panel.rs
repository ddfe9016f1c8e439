//! Editable content panel: fetch, view, edit, persist.
//!
//! DESIGN
//! ======
//! Text moves through `Viewing -> Editing -> Saving -> Viewing | Editing`.
//! The displayed title and paragraphs only change on a successful fetch or a
//! successful save; edits live in an [`EditBuffer`] until the backend
//! acknowledges them. Image slots run beside the text state and can be
//! replaced in any text mode.
//!
//! Operations take `&self` so the text load and the image loads can run
//! concurrently. The state lock is never held across an `.await`; each
//! operation snapshots what it needs, performs the request, then re-locks
//! and checks the panel is still mounted before applying the result.
//!
//! ERROR HANDLING
//! ==============
//! Store failures are logged and turned into the panel's error string.
//! Nothing here returns an error or panics on a failed request.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::assets::{AssetSlots, ImageView};
use super::catalog::PanelSpec;
use crate::net::content::ContentStore;
use crate::net::files::FileStore;
use crate::net::types::{ContentRecord, UploadFile};
use crate::preview::PreviewRegistry;
use crate::session::AdminGate;

pub const FETCH_CONTENT_ERROR: &str = "Error fetching content. Please try again later.";
pub const SAVE_CONTENT_ERROR: &str = "Error saving content. Please try again later.";
pub const FETCH_IMAGES_ERROR: &str = "Failed to load images";

/// Text mode of a panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelMode {
    #[default]
    Viewing,
    Editing,
    /// A save request is in flight; further saves and edits are refused.
    Saving,
}

/// Draft copy of the displayed text while editing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub title: String,
    /// Raw textarea contents; saved as a single paragraph block.
    pub paragraphs: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditField {
    Title,
    Paragraphs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The backend rejected the save; the panel stays in `Editing`.
    Failed,
    NotEditing,
    /// Another save for this panel has not resolved yet.
    InFlight,
    /// The panel was unmounted before the request resolved.
    Unmounted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    Replaced,
    Failed,
    Denied,
    NoSuchSlot,
    Unmounted,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelView {
    pub name: String,
    /// `None` for panels without an editable text record.
    pub title: Option<String>,
    pub paragraphs: Option<String>,
    pub mode: PanelMode,
    pub buffer: Option<EditBuffer>,
    /// Show the edit affordance.
    pub can_edit: bool,
    /// Show file pickers next to the images.
    pub can_upload: bool,
    pub images: Vec<ImageView>,
    pub error: Option<String>,
}

#[derive(Debug)]
struct PanelState {
    mounted: bool,
    /// Set once the first text fetch has resolved, successfully or not.
    loaded: bool,
    mode: PanelMode,
    title: String,
    paragraphs: String,
    buffer: Option<EditBuffer>,
    slots: AssetSlots,
    error: Option<String>,
}

pub struct EditableContentPanel {
    spec: PanelSpec,
    gate: AdminGate,
    content: Arc<dyn ContentStore>,
    files: Arc<dyn FileStore>,
    previews: PreviewRegistry,
    state: Mutex<PanelState>,
}

impl EditableContentPanel {
    /// Create a mounted panel showing its initial placeholders.
    #[must_use]
    pub fn new(
        spec: PanelSpec,
        gate: AdminGate,
        content: Arc<dyn ContentStore>,
        files: Arc<dyn FileStore>,
        previews: PreviewRegistry,
    ) -> Self {
        let (title, paragraphs) = spec
            .text
            .as_ref()
            .map(|t| (t.initial_title.clone(), t.initial_paragraph.clone()))
            .unwrap_or_default();
        let state = PanelState {
            mounted: true,
            loaded: false,
            mode: PanelMode::Viewing,
            title,
            paragraphs,
            buffer: None,
            slots: AssetSlots::new(&spec.slots),
            error: None,
        };
        Self { spec, gate, content, files, previews, state: Mutex::new(state) }
    }

    #[must_use]
    pub fn spec(&self) -> &PanelSpec {
        &self.spec
    }

    #[must_use]
    pub fn mode(&self) -> PanelMode {
        self.lock().mode
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.lock().mounted
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Initial load: text record and images, concurrently.
    pub async fn mount(&self) {
        tokio::join!(self.load_content(), self.load_images());
    }

    /// Tear down: later resolutions become no-ops and every preview is
    /// released.
    pub fn unmount(&self) {
        let mut state = self.lock();
        state.mounted = false;
        state.buffer = None;
        state.slots.clear();
        debug!(panel = %self.spec.name, "panel unmounted");
    }

    /// Fetch the text record. On failure the displayed text is kept.
    pub async fn load_content(&self) {
        let Some(text) = &self.spec.text else {
            return;
        };
        if !self.is_mounted() {
            return;
        }

        let result = self.content.fetch(&text.component).await;

        let mut state = self.lock();
        if !state.mounted {
            debug!(component = %text.component, "content fetch resolved after unmount");
            return;
        }
        state.loaded = true;
        match result {
            Ok(Some(fetched)) => {
                let record = fetched.resolve(&text.component, &text.fallback_title, &text.fallback_paragraph);
                state.paragraphs = record.paragraph_text();
                state.title = record.content;
            }
            Ok(None) => debug!(component = %text.component, "no text record stored"),
            Err(e) => {
                warn!(component = %text.component, error = %e, "content fetch failed");
                state.error = Some(FETCH_CONTENT_ERROR.to_owned());
            }
        }
    }

    /// Fetch every asset not yet requested by this instance.
    pub async fn load_images(&self) {
        let titles = {
            let mut state = self.lock();
            if !state.mounted {
                return;
            }
            state.slots.claim_unfetched()
        };
        if titles.is_empty() {
            return;
        }

        let results = join_all(titles.iter().map(|title| self.files.fetch_by_title(title))).await;

        let mut state = self.lock();
        if !state.mounted {
            debug!(panel = %self.spec.name, "image fetch resolved after unmount");
            return;
        }
        for (title, result) in titles.iter().zip(results) {
            match result {
                Ok(asset) => {
                    let handle = self.previews.create(asset.bytes, asset.mime_type);
                    let slots = state.slots.apply_fetched(title, &handle);
                    debug!(%title, slots, "asset preview installed");
                }
                Err(e) => {
                    warn!(%title, error = %e, "asset fetch failed");
                    state.error = Some(FETCH_IMAGES_ERROR.to_owned());
                }
            }
        }
    }

    // =========================================================================
    // TEXT EDITING
    // =========================================================================

    /// Enter edit mode. Returns `false` and changes nothing unless the gate
    /// grants admin and the panel is viewing an editable record whose first
    /// fetch has resolved.
    pub fn begin_edit(&self) -> bool {
        if !self.gate.is_admin() || self.spec.text.is_none() {
            return false;
        }
        let mut state = self.lock();
        if !state.mounted || !state.loaded || state.mode != PanelMode::Viewing {
            return false;
        }
        state.buffer = Some(EditBuffer { title: state.title.clone(), paragraphs: state.paragraphs.clone() });
        state.mode = PanelMode::Editing;
        true
    }

    /// Update one buffer field. Only allowed in `Editing`.
    pub fn change(&self, field: EditField, value: impl Into<String>) -> bool {
        let mut state = self.lock();
        if state.mode != PanelMode::Editing {
            return false;
        }
        let Some(buffer) = state.buffer.as_mut() else {
            return false;
        };
        match field {
            EditField::Title => buffer.title = value.into(),
            EditField::Paragraphs => buffer.paragraphs = value.into(),
        }
        true
    }

    /// Leave edit mode, discarding the buffer.
    pub fn cancel_edit(&self) -> bool {
        let mut state = self.lock();
        if state.mode != PanelMode::Editing {
            return false;
        }
        state.buffer = None;
        state.mode = PanelMode::Viewing;
        true
    }

    /// Persist the buffer. On success the buffer becomes the displayed text;
    /// on failure the panel returns to `Editing` with the buffer intact.
    pub async fn save(&self) -> SaveOutcome {
        let Some(text) = &self.spec.text else {
            return SaveOutcome::NotEditing;
        };

        let record = {
            let mut state = self.lock();
            match state.mode {
                PanelMode::Viewing => return SaveOutcome::NotEditing,
                PanelMode::Saving => return SaveOutcome::InFlight,
                PanelMode::Editing => {}
            }
            let Some(buffer) = state.buffer.as_ref() else {
                return SaveOutcome::NotEditing;
            };
            let record = ContentRecord::for_save(&text.component, &buffer.title, buffer.paragraphs.as_str());
            state.mode = PanelMode::Saving;
            record
        };

        let result = self.content.save(&record).await;

        let mut state = self.lock();
        if !state.mounted {
            debug!(component = %record.component, "save resolved after unmount");
            return SaveOutcome::Unmounted;
        }
        match result {
            Ok(()) => {
                info!(component = %record.component, "content saved");
                state.paragraphs = record.paragraph_text();
                state.title = record.content;
                state.buffer = None;
                state.error = None;
                state.mode = PanelMode::Viewing;
                SaveOutcome::Saved
            }
            Err(e) => {
                warn!(component = %record.component, error = %e, "content save failed");
                state.error = Some(SAVE_CONTENT_ERROR.to_owned());
                state.mode = PanelMode::Editing;
                SaveOutcome::Failed
            }
        }
    }

    // =========================================================================
    // IMAGES
    // =========================================================================

    /// Upload `file` as the asset behind slot `index` and, once acknowledged,
    /// preview the local bytes in that slot. The preview is not reconciled
    /// with what the backend stored.
    pub async fn replace_image(&self, index: usize, file: UploadFile) -> UploadOutcome {
        if !self.gate.is_admin() {
            return UploadOutcome::Denied;
        }
        let title = {
            let state = self.lock();
            if !state.mounted {
                return UploadOutcome::Unmounted;
            }
            match state.slots.spec(index) {
                Some(slot) => slot.asset_title.clone(),
                None => return UploadOutcome::NoSuchSlot,
            }
        };

        let result = self.files.upload(&title, &file).await;

        let mut state = self.lock();
        if !state.mounted {
            debug!(%title, "upload resolved after unmount");
            return UploadOutcome::Unmounted;
        }
        match result {
            Ok(ack) => {
                info!(%title, message = %ack.message, "image updated");
                let handle = self.previews.create(file.bytes, file.mime_type);
                state.slots.replace(index, handle);
                state.error = None;
                UploadOutcome::Replaced
            }
            Err(e) => {
                warn!(%title, error = %e, "image upload failed");
                state.error = Some(format!("Error updating image for {title}"));
                UploadOutcome::Failed
            }
        }
    }

    // =========================================================================
    // RENDERING
    // =========================================================================

    #[must_use]
    pub fn view(&self) -> PanelView {
        let state = self.lock();
        let has_text = self.spec.text.is_some();
        let is_admin = self.gate.is_admin();
        PanelView {
            name: self.spec.name.clone(),
            title: has_text.then(|| state.title.clone()),
            paragraphs: has_text.then(|| state.paragraphs.clone()),
            mode: state.mode,
            buffer: state.buffer.clone(),
            can_edit: is_admin && has_text && state.loaded && state.mode == PanelMode::Viewing,
            can_upload: is_admin && !state.slots.is_empty(),
            images: state.slots.views(),
            error: state.error.clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
