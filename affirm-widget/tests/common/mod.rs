//! Shared test helpers for widget sync tests.

#![allow(dead_code)]

use affirm_store::MemoryStore;
use affirm_types::{Affirmation, Platform};
use affirm_widget::{WidgetSync, WidgetSyncConfig};
use std::sync::Arc;

pub const ANDROID_RENDERER: &str = "AffirmationWidgetProvider";
pub const IOS_RENDERER: &str = "AffirmationWidget";

/// Config with latency monitoring on, regardless of build profile.
pub fn config(platform: Platform) -> WidgetSyncConfig {
    WidgetSyncConfig {
        monitor_latency: true,
        ..WidgetSyncConfig::for_platform(platform)
    }
}

/// An Android-keyed orchestrator over a fresh memory store.
pub fn make_sync() -> (Arc<MemoryStore>, WidgetSync) {
    make_sync_for(Platform::Android)
}

pub fn make_sync_for(platform: Platform) -> (Arc<MemoryStore>, WidgetSync) {
    let store = Arc::new(MemoryStore::new());
    let sync = WidgetSync::new(store.clone(), config(platform)).unwrap();
    (store, sync)
}

/// `n` distinct affirmations.
pub fn items(n: usize) -> Vec<Affirmation> {
    (0..n)
        .map(|i| Affirmation::new(format!("aff-{i:03}"), format!("I am growing, day {i}")))
        .collect()
}
