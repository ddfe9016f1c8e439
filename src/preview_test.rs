use super::*;

#[test]
fn create_registers_resolvable_entry() {
    let registry = PreviewRegistry::new();
    let handle = registry.create(vec![1_u8, 2, 3], "image/png");

    assert!(handle.url().starts_with("blob:panels/"));
    let data = registry.resolve(handle.url()).unwrap();
    assert_eq!(&*data.bytes, &[1, 2, 3]);
    assert_eq!(data.mime_type, "image/png");
    assert_eq!(registry.live_count(), 1);
}

#[test]
fn dropping_last_handle_revokes_entry() {
    let registry = PreviewRegistry::new();
    let handle = registry.create(vec![9_u8], "image/jpeg");
    let url = handle.url().to_owned();

    drop(handle);
    assert_eq!(registry.live_count(), 0);
    assert!(registry.resolve(&url).is_none());
}

#[test]
fn clones_share_one_entry() {
    let registry = PreviewRegistry::new();
    let first = registry.create(vec![1_u8], "image/png");
    let second = first.clone();
    assert!(first.same_entry(&second));

    drop(first);
    assert_eq!(registry.live_count(), 1);
    assert!(registry.resolve(second.url()).is_some());

    drop(second);
    assert_eq!(registry.live_count(), 0);
}

#[test]
fn distinct_handles_are_independent() {
    let registry = PreviewRegistry::new();
    let a = registry.create(vec![1_u8], "image/png");
    let b = registry.create(vec![2_u8], "image/png");
    assert!(!a.same_entry(&b));
    assert_ne!(a.url(), b.url());

    drop(a);
    assert_eq!(registry.live_count(), 1);
    assert_eq!(&*registry.resolve(b.url()).unwrap().bytes, &[2]);
}

#[test]
fn resolve_rejects_foreign_urls() {
    let registry = PreviewRegistry::new();
    let _handle = registry.create(vec![1_u8], "image/png");

    assert!(registry.resolve("/LandingPage/Rectangle.png").is_none());
    assert!(registry.resolve("blob:panels/not-a-uuid").is_none());
}
