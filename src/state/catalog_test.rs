use super::*;

#[test]
fn every_listed_name_resolves() {
    for name in PANEL_NAMES {
        let spec = builtin(name).unwrap();
        assert_eq!(spec.name, name);
    }
}

#[test]
fn lookup_is_case_sensitive() {
    assert!(builtin("heroabout").is_none());
    assert!(builtin("").is_none());
}

#[test]
fn hero_about_edits_its_own_record_without_images() {
    let spec = hero_about();
    let text = spec.text.unwrap();
    assert_eq!(text.component, "HeroAbout");
    assert_eq!(text.initial_title, "xxxxxxxxxxxxxxxxxxx");
    assert_eq!(text.fallback_title, "Your Hero Title Here");
    assert_eq!(text.fallback_paragraph, "Your description paragraph here.");
    assert!(spec.slots.is_empty());
}

#[test]
fn best_job_slots_share_one_asset_title() {
    let spec = best_job();
    assert!(spec.text.is_none());
    assert_eq!(spec.slots.len(), 2);
    assert_eq!(spec.slots[0].asset_title, spec.slots[1].asset_title);
    assert_ne!(spec.slots[0].default_src, spec.slots[1].default_src);
}

#[test]
fn single_image_panels_use_distinct_titles() {
    assert_eq!(best_job2().slots[0].asset_title, "BesstBudy2");
    assert_eq!(best_job3().slots[0].asset_title, "starteryou-v2");
}
