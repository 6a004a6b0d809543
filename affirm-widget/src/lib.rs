//! Home-screen widget sync layer for Affirm.
//!
//! Propagates app state into the shared store that the widget renderer
//! reads from. The renderer runs in its own OS-scheduled process and
//! cannot call back into the app; all it gets is the store plus a
//! "reload" signal.
//!
//! # Architecture
//!
//! - **Keys**: resolves logical fields to platform storage keys, once
//! - **Batch**: writes one logical update's fields concurrently and waits
//!   for all of them
//! - **Notifier**: fires the renderer refresh signal
//! - **Sync**: the public [`WidgetSync`] API composing the above
//! - **Latency**: development-time timing against a fixed budget
//!
//! ## Publish sequence
//!
//! 1. Build a [`Batch`] from plain values (derived list fields are computed
//!    from the same in-memory list before anything is written)
//! 2. Commit every write concurrently and wait for all to finish
//! 3. Notify the renderer exactly once, even if some writes failed
//! 4. Report success as a boolean; details go to the log
//!
//! There are no retries and no rollback. The next publish overwrites
//! whatever a failed one left behind.
//!
//! # Example
//!
//! ```
//! use affirm_store::MemoryStore;
//! use affirm_types::{Affirmation, WidgetSettings};
//! use affirm_widget::{WidgetSync, WidgetSyncConfig};
//! use std::sync::Arc;
//!
//! # tokio_test_block(async {
//! let store = Arc::new(MemoryStore::new());
//! let sync = WidgetSync::new(store, WidgetSyncConfig::default()).unwrap();
//!
//! let items = vec![Affirmation::new("1", "I am calm")];
//! assert!(sync.publish_list(&items).await);
//! assert!(sync.read_has_items().await);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

pub mod batch;
mod config;
mod error;
pub mod keys;
pub mod latency;
pub mod notifier;
mod sync;

pub use batch::{Batch, BatchWriter, CommitOutcome, FieldWrite, WriteFailure};
pub use config::{RendererNames, WidgetSyncConfig};
pub use error::{SyncError, SyncResult};
pub use keys::{Field, FieldKind, FieldRecord, KeySchema};
pub use latency::{LatencyMonitor, LatencyStats, DEFAULT_LATENCY_BUDGET};
pub use notifier::RefreshNotifier;
pub use sync::{PublishReport, WidgetSync};
