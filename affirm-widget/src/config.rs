//! Widget sync configuration.

use crate::error::{SyncError, SyncResult};
use crate::latency::DEFAULT_LATENCY_BUDGET;
use affirm_types::Platform;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Renderer (widget kind) names per platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererNames {
    /// WidgetKit kind.
    pub ios: String,
    /// `AppWidgetProvider` class name.
    pub android: String,
}

impl Default for RendererNames {
    fn default() -> Self {
        Self {
            ios: "AffirmationWidget".to_string(),
            android: "AffirmationWidgetProvider".to_string(),
        }
    }
}

/// Configuration for [`crate::WidgetSync`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSyncConfig {
    /// Platform whose key schema and renderer name are used.
    pub platform: Platform,
    pub renderer: RendererNames,
    /// Latency budget per operation, in milliseconds.
    pub latency_budget_ms: u64,
    /// Time operations against the budget. Off in release builds.
    pub monitor_latency: bool,
}

impl Default for WidgetSyncConfig {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            renderer: RendererNames::default(),
            latency_budget_ms: DEFAULT_LATENCY_BUDGET.as_millis() as u64,
            monitor_latency: cfg!(debug_assertions),
        }
    }
}

impl WidgetSyncConfig {
    /// Default config for `platform`.
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            ..Default::default()
        }
    }

    /// Parses and validates a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> SyncResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The renderer name for the configured platform.
    pub fn renderer_id(&self) -> &str {
        match self.platform {
            Platform::Ios => &self.renderer.ios,
            Platform::Android => &self.renderer.android,
        }
    }

    pub fn latency_budget(&self) -> Duration {
        Duration::from_millis(self.latency_budget_ms)
    }

    pub fn validate(&self) -> SyncResult<()> {
        if self.renderer_id().trim().is_empty() {
            return Err(SyncError::InvalidConfig(format!(
                "renderer name for {} is empty",
                self.platform
            )));
        }
        if self.latency_budget_ms == 0 {
            return Err(SyncError::InvalidConfig(
                "latency budget must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
