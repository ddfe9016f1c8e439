//! Panel state: definitions, image slots, and the edit/persist cycle.
//!
//! SYSTEM CONTEXT
//! ==============
//! `catalog` describes the site's panels, `assets` tracks per-slot previews,
//! and `panel` drives one mounted panel against the stores in `net`.

pub mod assets;
pub mod catalog;
pub mod panel;

pub use panel::{EditField, EditableContentPanel, PanelMode, PanelView, SaveOutcome, UploadOutcome};
