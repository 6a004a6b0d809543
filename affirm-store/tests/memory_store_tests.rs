use affirm_store::{MemoryStore, SharedStore, StoreError, StoreOp, StoreValue};
use std::time::{Duration, Instant};

// ── Basic get/set ───────────────────────────────────────────────

#[tokio::test]
async fn get_missing_key_is_none() {
    let store = MemoryStore::new();
    assert!(store.get("nothing").await.unwrap().is_none());
}

#[tokio::test]
async fn set_then_get() {
    let store = MemoryStore::new();
    store.set("count", StoreValue::Int(3)).await.unwrap();
    assert_eq!(store.get("count").await.unwrap(), Some(StoreValue::Int(3)));
    assert_eq!(store.peek("count"), Some(StoreValue::Int(3)));
}

#[tokio::test]
async fn set_overwrites_wholesale() {
    let store = MemoryStore::new();
    store.set("k", "first".into()).await.unwrap();
    store.set("k", StoreValue::Bool(false)).await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some(StoreValue::Bool(false)));
}

#[tokio::test]
async fn remove_then_get_is_none() {
    let store = MemoryStore::new();
    store.set("k", "v".into()).await.unwrap();
    store.remove("k").await.unwrap();
    assert!(store.get("k").await.unwrap().is_none());
    // Removing again is fine
    store.remove("k").await.unwrap();
}

#[tokio::test]
async fn keys_are_sorted() {
    let store = MemoryStore::new();
    store.set("b", 1i64.into()).await.unwrap();
    store.set("a", 2i64.into()).await.unwrap();
    assert_eq!(store.keys().await.unwrap(), vec!["a", "b"]);
    assert_eq!(store.len(), 2);
}

// ── Recording ───────────────────────────────────────────────────

#[tokio::test]
async fn operations_are_recorded_in_order() {
    let store = MemoryStore::new();
    store.set("a", 1i64.into()).await.unwrap();
    store.remove("b").await.unwrap();
    store.notify("Widget").await.unwrap();

    assert_eq!(
        store.operations(),
        vec![
            StoreOp::Set("a".into()),
            StoreOp::Remove("b".into()),
            StoreOp::Notify("Widget".into()),
        ]
    );
    assert_eq!(store.write_count(), 2);
}

#[tokio::test]
async fn notify_counts_per_renderer() {
    let store = MemoryStore::new();
    store.notify("A").await.unwrap();
    store.notify("A").await.unwrap();
    store.notify("B").await.unwrap();
    assert_eq!(store.notify_count("A"), 2);
    assert_eq!(store.notify_count("B"), 1);
    assert_eq!(store.notify_count("C"), 0);
    assert_eq!(store.total_notifies(), 3);

    store.reset_history();
    assert_eq!(store.total_notifies(), 0);
    assert!(store.operations().is_empty());
}

// ── Fault injection ─────────────────────────────────────────────

#[tokio::test]
async fn unavailable_store_fails_everything() {
    let store = MemoryStore::unavailable();
    assert!(matches!(store.get("k").await, Err(StoreError::Unavailable(_))));
    assert!(matches!(
        store.set("k", "v".into()).await,
        Err(StoreError::Unavailable(_))
    ));
    assert!(matches!(store.notify("W").await, Err(StoreError::Unavailable(_))));

    store.set_available(true);
    store.set("k", "v".into()).await.unwrap();
}

#[tokio::test]
async fn failing_key_only_affects_that_key() {
    let store = MemoryStore::new();
    store.fail_writes_to("bad");

    let err = store.set("bad", "v".into()).await.unwrap_err();
    assert!(matches!(err, StoreError::WriteFailed { ref key, .. } if key == "bad"));
    store.set("good", "v".into()).await.unwrap();
    assert!(store.peek("bad").is_none());

    store.clear_write_failures();
    store.set("bad", "v".into()).await.unwrap();
    assert!(store.peek("bad").is_some());
}

#[tokio::test]
async fn failing_notify_is_not_counted() {
    let store = MemoryStore::new();
    store.set_fail_notify(true);
    assert!(matches!(
        store.notify("W").await,
        Err(StoreError::NotifyFailed { .. })
    ));
    assert_eq!(store.notify_count("W"), 0);
}

#[tokio::test]
async fn write_delay_slows_writes() {
    let store = MemoryStore::new();
    store.set_write_delay(Some(Duration::from_millis(20)));
    let start = Instant::now();
    store.set("k", "v".into()).await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(20));
}
