//! Built-in panel definitions for the marketing site.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each entry says which text record a panel edits (if any), what it shows
//! before and instead of a usable record, and which asset titles back its
//! image slots.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

pub const DEFAULT_INITIAL_TITLE: &str = "xxxxxxxxxxxxxxxxxxx";
pub const DEFAULT_INITIAL_PARAGRAPH: &str = "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx";
pub const DEFAULT_FALLBACK_TITLE: &str = "Your Hero Title Here";
pub const DEFAULT_FALLBACK_PARAGRAPH: &str = "Your description paragraph here.";

/// Names accepted by [`builtin`].
pub const PANEL_NAMES: [&str; 4] = ["HeroAbout", "BestJob", "BestJob2", "BestJob3"];

/// Editable text record bound to a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpec {
    /// Component identifier the record is stored under.
    pub component: String,
    /// Shown until the first fetch resolves.
    pub initial_title: String,
    pub initial_paragraph: String,
    /// Shown when the fetched record lacks a usable field.
    pub fallback_title: String,
    pub fallback_paragraph: String,
}

impl TextSpec {
    #[must_use]
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            initial_title: DEFAULT_INITIAL_TITLE.to_owned(),
            initial_paragraph: DEFAULT_INITIAL_PARAGRAPH.to_owned(),
            fallback_title: DEFAULT_FALLBACK_TITLE.to_owned(),
            fallback_paragraph: DEFAULT_FALLBACK_PARAGRAPH.to_owned(),
        }
    }
}

/// One image position in a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSpec {
    pub name: String,
    /// Asset title the slot downloads and uploads. Slots may share a title.
    pub asset_title: String,
    /// Static image shown until a preview is available.
    pub default_src: String,
}

impl SlotSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, asset_title: impl Into<String>, default_src: impl Into<String>) -> Self {
        Self { name: name.into(), asset_title: asset_title.into(), default_src: default_src.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSpec {
    pub name: String,
    pub text: Option<TextSpec>,
    pub slots: Vec<SlotSpec>,
}

impl PanelSpec {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), text: None, slots: Vec::new() }
    }

    #[must_use]
    pub fn with_text(mut self, text: TextSpec) -> Self {
        self.text = Some(text);
        self
    }

    #[must_use]
    pub fn with_slot(mut self, slot: SlotSpec) -> Self {
        self.slots.push(slot);
        self
    }
}

/// Look up a built-in panel by name (case-sensitive).
#[must_use]
pub fn builtin(name: &str) -> Option<PanelSpec> {
    match name {
        "HeroAbout" => Some(hero_about()),
        "BestJob" => Some(best_job()),
        "BestJob2" => Some(best_job2()),
        "BestJob3" => Some(best_job3()),
        _ => None,
    }
}

/// About-page hero: editable title and paragraph, static artwork.
#[must_use]
pub fn hero_about() -> PanelSpec {
    PanelSpec::new("HeroAbout").with_text(TextSpec::new("HeroAbout"))
}

/// Landing block with two images backed by the same asset.
#[must_use]
pub fn best_job() -> PanelSpec {
    PanelSpec::new("BestJob")
        .with_slot(SlotSpec::new("image1", "starteryou-v2", "/LandingPage/Rectangle.png"))
        .with_slot(SlotSpec::new("image2", "starteryou-v2", "/LandingPage/Heroimg2.jpg"))
}

#[must_use]
pub fn best_job2() -> PanelSpec {
    PanelSpec::new("BestJob2").with_slot(SlotSpec::new("image", "BesstBudy2", "/LandingPage/Rectangle.png"))
}

#[must_use]
pub fn best_job3() -> PanelSpec {
    PanelSpec::new("BestJob3").with_slot(SlotSpec::new("image", "starteryou-v2", "/LandingPage/Rectangle.png"))
}
