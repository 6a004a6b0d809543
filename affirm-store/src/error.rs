//! Error types for the store adapters.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store is not configured (e.g. missing app-group setup).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A single key could not be written.
    #[error("write to {key} failed: {reason}")]
    WriteFailed { key: String, reason: String },

    /// The renderer refresh signal was not delivered.
    #[error("notify {renderer} failed: {reason}")]
    NotifyFailed { renderer: String, reason: String },
}
