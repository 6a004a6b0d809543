//! Widget-facing data types for Affirm.
//!
//! These are the plain values the application hands to the widget sync
//! layer and the values a renderer reads back out of the shared store:
//! - Affirmation list items and the currently displayed affirmation
//! - Widget settings (theme, rotation, font scale, refresh cadence)
//! - The target platform of the running process
//! - The assembled snapshot a renderer observes after a refresh
//!
//! Creating, editing and ordering affirmations is the job of the
//! application's repository layer, not this crate.

mod affirmation;
mod platform;
mod settings;
mod snapshot;

pub use affirmation::{decode_list, encode_list, Affirmation, CurrentAffirmation};
pub use platform::Platform;
pub use settings::{RefreshMode, ThemeMode, WidgetSettings};
pub use snapshot::WidgetSnapshot;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown {kind}: {value:?}")]
    UnknownVariant { kind: &'static str, value: String },
}
