//! Renderer refresh signal.

use crate::error::{SyncError, SyncResult};
use affirm_store::SharedStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Asks one renderer to re-read the shared store.
///
/// The signal carries no payload, so repeating it only costs a redundant
/// redraw.
pub struct RefreshNotifier {
    store: Arc<dyn SharedStore>,
    renderer: String,
}

impl RefreshNotifier {
    pub fn new(store: Arc<dyn SharedStore>, renderer: impl Into<String>) -> Self {
        Self {
            store,
            renderer: renderer.into(),
        }
    }

    /// The renderer this notifier signals.
    pub fn renderer(&self) -> &str {
        &self.renderer
    }

    /// Sends the signal, returning the failure cause.
    pub async fn try_notify(&self) -> SyncResult<()> {
        self.store
            .notify(&self.renderer)
            .await
            .map_err(|source| SyncError::Notify {
                renderer: self.renderer.clone(),
                source,
            })
    }

    /// Sends the signal. Failure is logged and reported as `false`.
    pub async fn notify(&self) -> bool {
        match self.try_notify().await {
            Ok(()) => {
                debug!(renderer = %self.renderer, "Renderer notified");
                true
            }
            Err(e) => {
                warn!(error = %e, "Renderer refresh signal failed");
                false
            }
        }
    }
}
