//! Error types for the widget sync layer.
//!
//! These never cross the boolean public API of [`crate::WidgetSync`]; they
//! exist for logging and for the `try_*` variants.

use affirm_store::StoreError;
use thiserror::Error;

/// Result type for widget sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in widget sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The shared store failed as a whole (e.g. not configured).
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A value could not be encoded for the store.
    #[error("encoding error: {0}")]
    Encode(#[from] affirm_types::Error),

    /// Some writes in a batch failed. Writes that succeeded stay applied.
    #[error("{failed} of {total} writes failed: {keys:?}")]
    BatchFailed {
        failed: usize,
        total: usize,
        keys: Vec<String>,
    },

    /// The renderer refresh signal was not delivered.
    #[error("notify {renderer} failed: {source}")]
    Notify {
        renderer: String,
        #[source]
        source: StoreError,
    },

    /// Configuration is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
