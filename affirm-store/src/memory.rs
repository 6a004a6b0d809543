//! In-process store adapter.
//!
//! Backs the widget layer in tests and on hosts without a widget surface.
//! Every call is recorded, and individual keys, the whole store, or the
//! refresh signal can be made to fail.

use crate::error::{StoreError, StoreResult};
use crate::store::SharedStore;
use crate::value::StoreValue;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// One recorded call against a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    Set(String),
    Remove(String),
    Notify(String),
}

#[derive(Debug)]
struct MemoryState {
    values: HashMap<String, StoreValue>,
    available: bool,
    failing_keys: HashSet<String>,
    fail_notify: bool,
    write_delay: Option<Duration>,
    ops: Vec<StoreOp>,
    notify_counts: HashMap<String, usize>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            available: true,
            failing_keys: HashSet::new(),
            fail_notify: false,
            write_delay: None,
            ops: Vec::new(),
            notify_counts: HashMap::new(),
        }
    }
}

/// A [`SharedStore`] held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Creates an empty, available store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that behaves like a missing app-group setup.
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_available(false);
        store
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Fault injection ──────────────────────────────────────────

    /// Toggles whether every call fails with [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.state().available = available;
    }

    /// Makes writes (set and remove) to `key` fail until cleared.
    pub fn fail_writes_to(&self, key: impl Into<String>) {
        self.state().failing_keys.insert(key.into());
    }

    /// Clears every per-key write failure.
    pub fn clear_write_failures(&self) {
        self.state().failing_keys.clear();
    }

    /// Makes the refresh signal fail.
    pub fn set_fail_notify(&self, fail: bool) {
        self.state().fail_notify = fail;
    }

    /// Delays every write by `delay` before it is applied.
    pub fn set_write_delay(&self, delay: Option<Duration>) {
        self.state().write_delay = delay;
    }

    // ── Inspection ───────────────────────────────────────────────

    /// Returns the value under `key` without going through the async API.
    pub fn peek(&self, key: &str) -> Option<StoreValue> {
        self.state().values.get(key).cloned()
    }

    /// Number of keys holding a value.
    pub fn len(&self) -> usize {
        self.state().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every successful call, in completion order.
    pub fn operations(&self) -> Vec<StoreOp> {
        self.state().ops.clone()
    }

    /// Number of successful writes (sets and removes).
    pub fn write_count(&self) -> usize {
        self.state()
            .ops
            .iter()
            .filter(|op| !matches!(op, StoreOp::Notify(_)))
            .count()
    }

    /// Number of delivered refresh signals for `renderer`.
    pub fn notify_count(&self, renderer: &str) -> usize {
        self.state().notify_counts.get(renderer).copied().unwrap_or(0)
    }

    /// Number of delivered refresh signals across all renderers.
    pub fn total_notifies(&self) -> usize {
        self.state().notify_counts.values().sum()
    }

    /// Forgets recorded operations and notify counts. Values are kept.
    pub fn reset_history(&self) {
        let mut state = self.state();
        state.ops.clear();
        state.notify_counts.clear();
    }

    fn check_available(state: &MemoryState) -> StoreResult<()> {
        if state.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store disabled".to_string()))
        }
    }

    async fn delay_write(&self) {
        let delay = self.state().write_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn check_writable(state: &MemoryState, key: &str) -> StoreResult<()> {
        Self::check_available(state)?;
        if state.failing_keys.contains(key) {
            return Err(StoreError::WriteFailed {
                key: key.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SharedStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> StoreResult<Option<StoreValue>> {
        let state = self.state();
        Self::check_available(&state)?;
        Ok(state.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: StoreValue) -> StoreResult<()> {
        self.delay_write().await;
        let mut state = self.state();
        Self::check_writable(&state, key)?;
        state.values.insert(key.to_string(), value);
        state.ops.push(StoreOp::Set(key.to_string()));
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.delay_write().await;
        let mut state = self.state();
        Self::check_writable(&state, key)?;
        state.values.remove(key);
        state.ops.push(StoreOp::Remove(key.to_string()));
        Ok(())
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        let state = self.state();
        Self::check_available(&state)?;
        let mut keys: Vec<String> = state.values.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn notify(&self, renderer: &str) -> StoreResult<()> {
        let mut state = self.state();
        Self::check_available(&state)?;
        if state.fail_notify {
            return Err(StoreError::NotifyFailed {
                renderer: renderer.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        *state.notify_counts.entry(renderer.to_string()).or_default() += 1;
        state.ops.push(StoreOp::Notify(renderer.to_string()));
        Ok(())
    }
}
