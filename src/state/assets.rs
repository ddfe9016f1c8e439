//! Image slot state for one panel instance.
//!
//! DESIGN
//! ======
//! Downloads are deduplicated by asset title for the lifetime of the
//! instance: once a title is claimed it is never requested again, even if
//! the first attempt failed. A fresh instance starts with an empty claim set.
//! A fetched asset is shown in every slot bound to its title; an upload only
//! replaces the slot it was made from.

#[cfg(test)]
#[path = "assets_test.rs"]
mod assets_test;

use std::collections::HashSet;

use super::catalog::SlotSpec;
use crate::preview::PreviewHandle;

/// Resolved image source for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub slot: String,
    pub src: String,
    /// `true` when `src` is a preview URL rather than the static default.
    pub is_preview: bool,
}

#[derive(Debug)]
struct SlotState {
    spec: SlotSpec,
    preview: Option<PreviewHandle>,
}

impl SlotState {
    /// Release the current preview before installing the next one.
    fn install(&mut self, handle: PreviewHandle) {
        drop(self.preview.take());
        self.preview = Some(handle);
    }
}

#[derive(Debug, Default)]
pub struct AssetSlots {
    slots: Vec<SlotState>,
    claimed: HashSet<String>,
}

impl AssetSlots {
    #[must_use]
    pub fn new(specs: &[SlotSpec]) -> Self {
        let slots = specs
            .iter()
            .map(|spec| SlotState { spec: spec.clone(), preview: None })
            .collect();
        Self { slots, claimed: HashSet::new() }
    }

    /// Titles that still need downloading, in slot order without duplicates.
    /// Returned titles are marked as claimed.
    pub fn claim_unfetched(&mut self) -> Vec<String> {
        let mut titles = Vec::new();
        for slot in &self.slots {
            let title = &slot.spec.asset_title;
            if self.claimed.insert(title.clone()) {
                titles.push(title.clone());
            }
        }
        titles
    }

    /// Show a downloaded asset in every slot bound to `title`.
    pub fn apply_fetched(&mut self, title: &str, handle: &PreviewHandle) -> usize {
        let mut applied = 0;
        for slot in self.slots.iter_mut().filter(|s| s.spec.asset_title == title) {
            slot.install(handle.clone());
            applied += 1;
        }
        applied
    }

    /// Show an uploaded file in the slot at `index` only.
    pub fn replace(&mut self, index: usize, handle: PreviewHandle) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                slot.install(handle);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn spec(&self, index: usize) -> Option<&SlotSpec> {
        self.slots.get(index).map(|s| &s.spec)
    }

    #[must_use]
    pub fn preview(&self, index: usize) -> Option<&PreviewHandle> {
        self.slots.get(index).and_then(|s| s.preview.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn views(&self) -> Vec<ImageView> {
        self.slots
            .iter()
            .map(|slot| match &slot.preview {
                Some(handle) => ImageView { slot: slot.spec.name.clone(), src: handle.url().to_owned(), is_preview: true },
                None => ImageView { slot: slot.spec.name.clone(), src: slot.spec.default_src.clone(), is_preview: false },
            })
            .collect()
    }

    /// Drop every preview and forget all claims.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.preview = None;
        }
        self.claimed.clear();
    }
}
