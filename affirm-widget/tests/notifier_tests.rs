use affirm_store::MemoryStore;
use affirm_widget::{RefreshNotifier, SyncError};
use std::sync::Arc;

#[tokio::test]
async fn notify_reaches_renderer() {
    let store = Arc::new(MemoryStore::new());
    let notifier = RefreshNotifier::new(store.clone(), "AffirmationWidget");

    assert!(notifier.notify().await);
    assert_eq!(store.notify_count("AffirmationWidget"), 1);
    assert_eq!(notifier.renderer(), "AffirmationWidget");
}

#[tokio::test]
async fn repeated_notify_is_harmless() {
    let store = Arc::new(MemoryStore::new());
    let notifier = RefreshNotifier::new(store.clone(), "W");
    for _ in 0..5 {
        assert!(notifier.notify().await);
    }
    assert_eq!(store.notify_count("W"), 5);
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn failure_is_false_not_panic() {
    let store = Arc::new(MemoryStore::new());
    store.set_fail_notify(true);
    let notifier = RefreshNotifier::new(store.clone(), "W");

    assert!(!notifier.notify().await);
    match notifier.try_notify().await {
        Err(SyncError::Notify { renderer, .. }) => assert_eq!(renderer, "W"),
        other => panic!("expected Notify error, got {other:?}"),
    }
}
