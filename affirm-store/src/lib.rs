//! Shared key-value store adapters for the Affirm widget.
//!
//! The widget renderer runs in a separate, OS-scheduled process. The only
//! channel between it and the app is a platform-provided persistent store
//! (an app-group `UserDefaults` suite on iOS, `SharedPreferences` on Android)
//! plus a one-way "reload this widget" signal. This crate abstracts both
//! behind [`SharedStore`].
//!
//! # Adapters
//!
//! - [`MemoryStore`]: in-process map with fault injection and call
//!   recording, for tests and for hosts without a widget surface
//! - [`FileStore`]: a JSON document inside an app-group container
//!   directory, for desktop development and the inspection CLI
//!
//! # Contract
//!
//! - A value written by [`SharedStore::set`] is visible to readers once the
//!   call returns.
//! - [`SharedStore::get`] returns `Ok(None)` for keys that were never
//!   written or have been removed.
//! - There are no multi-key transactions.

mod error;
mod file;
mod memory;
mod store;
mod value;

pub use error::{StoreError, StoreResult};
pub use file::{FileStore, FileStoreConfig};
pub use memory::{MemoryStore, StoreOp};
pub use store::SharedStore;
pub use value::StoreValue;
