use affirm_store::{MemoryStore, SharedStore, StoreError, StoreValue};
use affirm_types::Platform;
use affirm_widget::{Batch, BatchWriter, Field, KeySchema, SyncError};
use std::sync::Arc;
use std::time::Duration;

fn writer(store: &Arc<MemoryStore>) -> BatchWriter {
    BatchWriter::new(store.clone(), KeySchema::for_platform(Platform::Android))
}

fn settings_like_batch() -> Batch {
    let mut batch = Batch::new();
    batch
        .set(Field::ThemeMode, "dark")
        .set(Field::RotationEnabled, true)
        .set(Field::FontMultiplier, 1.2)
        .set(Field::RefreshMode, "hourly");
    batch
}

// ── Commit ──────────────────────────────────────────────────────

#[tokio::test]
async fn commit_writes_every_field() {
    let store = Arc::new(MemoryStore::new());
    let outcome = writer(&store).commit(&settings_like_batch()).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.written, 4);
    assert_eq!(store.peek("widget_theme_mode"), Some("dark".into()));
    assert_eq!(store.peek("widget_rotation_enabled"), Some(StoreValue::Bool(true)));
    assert_eq!(store.peek("widget_font_multiplier"), Some(StoreValue::Float(1.2)));
}

#[tokio::test]
async fn commit_never_notifies() {
    let store = Arc::new(MemoryStore::new());
    let _ = writer(&store).commit(&settings_like_batch()).await;
    assert_eq!(store.total_notifies(), 0);
}

#[tokio::test]
async fn clear_removes_key() {
    let store = Arc::new(MemoryStore::new());
    store.set("widget_current_text", "old".into()).await.unwrap();

    let mut batch = Batch::new();
    batch.clear(Field::CurrentText);
    let outcome = writer(&store).commit(&batch).await;

    assert!(outcome.is_success());
    assert!(store.peek("widget_current_text").is_none());
}

#[tokio::test(start_paused = true)]
async fn writes_are_issued_concurrently() {
    let store = Arc::new(MemoryStore::new());
    store.set_write_delay(Some(Duration::from_millis(100)));

    let start = tokio::time::Instant::now();
    let outcome = writer(&store).commit(&settings_like_batch()).await;

    assert!(outcome.is_success());
    // Four sequential writes would take 400ms of (virtual) time.
    assert!(start.elapsed() < Duration::from_millis(200));
    assert_eq!(store.write_count(), 4);
}

#[tokio::test]
async fn empty_batch_is_success() {
    let store = Arc::new(MemoryStore::new());
    let outcome = writer(&store).commit(&Batch::new()).await;
    assert!(outcome.is_success());
    assert_eq!(outcome.total(), 0);
}

// ── Failures ────────────────────────────────────────────────────

#[tokio::test]
async fn one_failing_write_keeps_the_others() {
    let store = Arc::new(MemoryStore::new());
    store.fail_writes_to("widget_font_multiplier");

    let outcome = writer(&store).commit(&settings_like_batch()).await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.written, 3);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].field, Field::FontMultiplier);
    assert_eq!(outcome.failures[0].key, "widget_font_multiplier");
    // No rollback
    assert_eq!(store.peek("widget_theme_mode"), Some("dark".into()));

    match outcome.into_result() {
        Err(SyncError::BatchFailed { failed, total, keys }) => {
            assert_eq!(failed, 1);
            assert_eq!(total, 4);
            assert_eq!(keys, vec!["widget_font_multiplier".to_string()]);
        }
        other => panic!("expected BatchFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn mistyped_value_fails_without_touching_store() {
    let store = Arc::new(MemoryStore::new());
    let mut batch = Batch::new();
    batch.set(Field::ListCount, "three");

    let outcome = writer(&store).commit(&batch).await;

    assert_eq!(outcome.failures.len(), 1);
    assert!(matches!(
        outcome.failures[0].error,
        StoreError::WriteFailed { .. }
    ));
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn unavailable_store_reports_store_error() {
    let store = Arc::new(MemoryStore::unavailable());
    let outcome = writer(&store).commit(&settings_like_batch()).await;

    assert_eq!(outcome.written, 0);
    assert!(matches!(
        outcome.into_result(),
        Err(SyncError::Store(StoreError::Unavailable(_)))
    ));
}
