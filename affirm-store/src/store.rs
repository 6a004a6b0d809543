//! Shared store abstraction trait.

use crate::error::StoreResult;
use crate::value::StoreValue;
use async_trait::async_trait;

/// A persistent key-value store shared between the app and its widget
/// renderer, plus the renderer refresh signal.
///
/// Implementations must be safe to call concurrently; writes to distinct
/// keys are independent.
#[async_trait]
pub trait SharedStore: Send + Sync {
    /// Returns the name of the backing store, for logs.
    fn backend_name(&self) -> &'static str;

    /// Reads a key. Missing or removed keys yield `Ok(None)`.
    async fn get(&self, key: &str) -> StoreResult<Option<StoreValue>>;

    /// Writes a key. The value is visible to readers once this returns.
    async fn set(&self, key: &str, value: StoreValue) -> StoreResult<()>;

    /// Removes a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Lists the keys currently holding a value.
    async fn keys(&self) -> StoreResult<Vec<String>>;

    /// Asks the named renderer to re-read the store and redraw.
    ///
    /// Carries no payload. Calling it repeatedly is harmless.
    async fn notify(&self, renderer: &str) -> StoreResult<()>;
}
