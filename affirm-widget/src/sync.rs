//! The widget sync orchestrator.
//!
//! [`WidgetSync`] turns plain app state into batches, commits them, and
//! signals the renderer once per operation. Public operations return a
//! boolean; each has a `try_*` twin that returns the typed cause instead.

use crate::batch::{Batch, BatchWriter};
use crate::config::WidgetSyncConfig;
use crate::error::SyncResult;
use crate::keys::{Field, KeySchema};
use crate::latency::{LatencyMonitor, LatencyStats};
use crate::notifier::RefreshNotifier;
use affirm_store::{SharedStore, StoreValue};
use affirm_types::{
    decode_list, encode_list, Affirmation, CurrentAffirmation, RefreshMode, ThemeMode,
    WidgetSettings, WidgetSnapshot,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Summary of one successful publish operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub operation: &'static str,
    /// Fields written or cleared.
    pub written: usize,
    /// Whether the renderer signal was delivered.
    pub notified: bool,
    /// Wall-clock time, when latency monitoring is on.
    pub elapsed: Option<Duration>,
}

/// Publishes app state to the widget renderer through a shared store.
///
/// Construct one per process and hand it to whatever publishes. Concurrent
/// calls are not serialized against each other; two publishes touching the
/// same fields may interleave their writes.
pub struct WidgetSync {
    store: Arc<dyn SharedStore>,
    config: WidgetSyncConfig,
    writer: BatchWriter,
    notifier: RefreshNotifier,
    monitor: LatencyMonitor,
}

impl WidgetSync {
    /// Creates the orchestrator, resolving the key schema for the
    /// configured platform.
    pub fn new(store: Arc<dyn SharedStore>, config: WidgetSyncConfig) -> SyncResult<Self> {
        config.validate()?;
        let schema = KeySchema::for_platform(config.platform);
        let monitor = if config.monitor_latency {
            LatencyMonitor::new(config.latency_budget())
        } else {
            LatencyMonitor::disabled()
        };
        info!(
            platform = %config.platform,
            renderer = config.renderer_id(),
            backend = store.backend_name(),
            "Widget sync ready"
        );
        Ok(Self {
            writer: BatchWriter::new(Arc::clone(&store), schema),
            notifier: RefreshNotifier::new(Arc::clone(&store), config.renderer_id()),
            store,
            config,
            monitor,
        })
    }

    pub fn config(&self) -> &WidgetSyncConfig {
        &self.config
    }

    pub fn schema(&self) -> &KeySchema {
        self.writer.schema()
    }

    pub fn latency_stats(&self) -> LatencyStats {
        self.monitor.stats()
    }

    // ── Batch builders ───────────────────────────────────────────

    /// Writes for the current-item pair plus the update timestamp.
    ///
    /// `None` clears text and id together.
    pub fn current_item_batch(current: Option<&CurrentAffirmation>, now: DateTime<Utc>) -> Batch {
        let mut batch = Batch::new();
        match current {
            Some(item) => {
                batch
                    .set(Field::CurrentText, item.text.as_str())
                    .set(Field::CurrentId, item.id.as_str());
            }
            None => {
                batch.clear(Field::CurrentText).clear(Field::CurrentId);
            }
        }
        batch.set(Field::LastUpdate, now.to_rfc3339());
        batch
    }

    /// Writes for the whole settings group.
    pub fn settings_batch(settings: &WidgetSettings) -> Batch {
        let mut batch = Batch::new();
        batch
            .set(Field::ThemeMode, settings.theme.as_str())
            .set(Field::RotationEnabled, settings.rotation_enabled)
            .set(Field::FontMultiplier, settings.font_multiplier)
            .set(Field::RefreshMode, settings.refresh_mode.as_str());
        batch
    }

    /// Writes for the list bundle.
    ///
    /// JSON, count and has-items are all derived from `items` before the
    /// batch exists, so they cannot disagree once it lands.
    pub fn list_batch(items: &[Affirmation]) -> SyncResult<Batch> {
        let json = encode_list(items)?;
        let count = items.len() as i64;
        let has_items = !items.is_empty();

        let mut batch = Batch::new();
        batch
            .set(Field::ListJson, json)
            .set(Field::ListCount, count)
            .set(Field::HasItems, has_items);
        Ok(batch)
    }

    /// Writes that reset every field.
    ///
    /// The derived list fields are written as their empty values so a
    /// renderer reading only the flag still sees an empty list.
    pub fn clear_batch() -> Batch {
        let mut batch = Batch::new();
        for field in Field::ALL {
            match field {
                Field::ListCount => batch.set(field, 0i64),
                Field::HasItems => batch.set(field, false),
                _ => batch.clear(field),
            };
        }
        batch
    }

    // ── Publishing ───────────────────────────────────────────────

    /// Builds, commits and signals one operation under the latency monitor.
    async fn run<B>(&self, operation: &'static str, build: B) -> SyncResult<PublishReport>
    where
        B: FnOnce() -> SyncResult<Batch>,
    {
        let (result, elapsed) = self
            .monitor
            .measure(operation, self.commit_and_notify(operation, build))
            .await;
        let (written, notified) = result?;
        Ok(PublishReport {
            operation,
            written,
            notified,
            elapsed,
        })
    }

    /// Commits the built batch, then notifies the renderer exactly once.
    ///
    /// The signal goes out even when the batch could not be built or only
    /// partly landed.
    async fn commit_and_notify<B>(
        &self,
        operation: &'static str,
        build: B,
    ) -> SyncResult<(usize, bool)>
    where
        B: FnOnce() -> SyncResult<Batch>,
    {
        let batch = match build() {
            Ok(batch) => batch,
            Err(e) => {
                self.notifier.notify().await;
                return Err(e);
            }
        };
        let outcome = self.writer.commit(&batch).await;
        let notified = self.notifier.notify().await;

        if !outcome.is_success() {
            warn!(
                operation,
                failed = outcome.failures.len(),
                total = outcome.total(),
                notified,
                "Widget publish incomplete"
            );
        }
        let written = outcome.into_result()?;
        debug!(operation, written, notified, "Widget publish committed");
        Ok((written, notified))
    }

    fn report(operation: &'static str, result: SyncResult<PublishReport>) -> bool {
        match result {
            Ok(_) => true,
            Err(e) => {
                warn!(operation, error = %e, "Widget publish failed");
                false
            }
        }
    }

    pub async fn try_publish_current_item(
        &self,
        current: Option<&CurrentAffirmation>,
    ) -> SyncResult<PublishReport> {
        self.run("publish_current_item", || {
            Ok(Self::current_item_batch(current, Utc::now()))
        })
        .await
    }

    /// Publishes the displayed affirmation, or clears it with `None`.
    pub async fn publish_current_item(&self, current: Option<&CurrentAffirmation>) -> bool {
        Self::report(
            "publish_current_item",
            self.try_publish_current_item(current).await,
        )
    }

    pub async fn try_publish_settings(
        &self,
        settings: &WidgetSettings,
    ) -> SyncResult<PublishReport> {
        self.run("publish_settings", || Ok(Self::settings_batch(settings)))
            .await
    }

    /// Publishes all four settings fields.
    pub async fn publish_settings(&self, settings: &WidgetSettings) -> bool {
        Self::report("publish_settings", self.try_publish_settings(settings).await)
    }

    pub async fn try_publish_list(&self, items: &[Affirmation]) -> SyncResult<PublishReport> {
        self.run("publish_list", || Self::list_batch(items)).await
    }

    /// Publishes the full list with its derived count and has-items flag.
    pub async fn publish_list(&self, items: &[Affirmation]) -> bool {
        Self::report("publish_list", self.try_publish_list(items).await)
    }

    pub async fn try_publish_all(
        &self,
        current: Option<&CurrentAffirmation>,
        settings: &WidgetSettings,
        items: Option<&[Affirmation]>,
    ) -> SyncResult<PublishReport> {
        self.run("publish_all", || {
            let mut batch = Self::current_item_batch(current, Utc::now());
            batch.merge(Self::settings_batch(settings));
            if let Some(items) = items {
                batch.merge(Self::list_batch(items)?);
            }
            Ok(batch)
        })
        .await
    }

    /// Publishes current item, settings and (when given) the list as one
    /// batch with a single renderer signal.
    ///
    /// `current == None` clears the current item. `items == None` leaves the
    /// stored list untouched.
    pub async fn publish_all(
        &self,
        current: Option<&CurrentAffirmation>,
        settings: &WidgetSettings,
        items: Option<&[Affirmation]>,
    ) -> bool {
        Self::report(
            "publish_all",
            self.try_publish_all(current, settings, items).await,
        )
    }

    pub async fn try_clear_all(&self) -> SyncResult<PublishReport> {
        self.run("clear_all", || Ok(Self::clear_batch())).await
    }

    /// Resets every widget field.
    pub async fn clear_all(&self) -> bool {
        Self::report("clear_all", self.try_clear_all().await)
    }

    // ── Reading ──────────────────────────────────────────────────

    /// Reads a field, mapping store failures to absent.
    async fn read(&self, field: Field) -> Option<StoreValue> {
        let key = self.schema().key(field);
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Widget field read failed");
                None
            }
        }
    }

    async fn read_text(&self, field: Field) -> Option<String> {
        match self.read(field).await? {
            StoreValue::Text(s) => Some(s),
            other => {
                debug!(%field, found = other.type_name(), "Unexpected widget field type");
                None
            }
        }
    }

    /// The current item, if both text and id are present.
    pub async fn read_current_item(&self) -> Option<CurrentAffirmation> {
        let (text, id) = futures::join!(
            self.read_text(Field::CurrentText),
            self.read_text(Field::CurrentId)
        );
        match (text, id) {
            (Some(text), Some(id)) => Some(CurrentAffirmation { id, text }),
            (None, None) => None,
            (text, id) => {
                warn!(
                    has_text = text.is_some(),
                    has_id = id.is_some(),
                    "Current widget item half present"
                );
                None
            }
        }
    }

    /// When the current item was last published.
    pub async fn read_last_update(&self) -> Option<DateTime<Utc>> {
        let raw = self.read_text(Field::LastUpdate).await?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| debug!(error = %e, "Unparseable widget timestamp"))
            .ok()
    }

    /// The settings group. Missing or unreadable fields take defaults.
    pub async fn read_settings(&self) -> WidgetSettings {
        let defaults = WidgetSettings::default();
        let (theme, rotation, font, refresh) = futures::join!(
            self.read_text(Field::ThemeMode),
            self.read(Field::RotationEnabled),
            self.read(Field::FontMultiplier),
            self.read_text(Field::RefreshMode)
        );
        WidgetSettings {
            theme: theme
                .and_then(|s| s.parse::<ThemeMode>().ok())
                .unwrap_or(defaults.theme),
            rotation_enabled: rotation
                .and_then(|v| v.as_bool())
                .unwrap_or(defaults.rotation_enabled),
            font_multiplier: font
                .and_then(|v| v.as_float())
                .unwrap_or(defaults.font_multiplier),
            refresh_mode: refresh
                .and_then(|s| s.parse::<RefreshMode>().ok())
                .unwrap_or(defaults.refresh_mode),
        }
    }

    /// The stored list. Absent or malformed JSON reads as empty.
    pub async fn read_list(&self) -> Vec<Affirmation> {
        let Some(json) = self.read_text(Field::ListJson).await else {
            return Vec::new();
        };
        match decode_list(&json) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Stored widget list is malformed");
                Vec::new()
            }
        }
    }

    /// The cached item count. Absent reads as 0.
    pub async fn read_count(&self) -> i64 {
        self.read(Field::ListCount)
            .await
            .and_then(|v| v.as_int())
            .unwrap_or(0)
    }

    /// The cached has-items flag. Absent reads as `false`.
    pub async fn read_has_items(&self) -> bool {
        self.read(Field::HasItems)
            .await
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// Everything a renderer would read, in one call.
    pub async fn read_snapshot(&self) -> WidgetSnapshot {
        let (current, last_updated, settings, items, count, has_items) = futures::join!(
            self.read_current_item(),
            self.read_last_update(),
            self.read_settings(),
            self.read_list(),
            self.read_count(),
            self.read_has_items()
        );
        WidgetSnapshot {
            current,
            last_updated,
            settings,
            items,
            count,
            has_items,
        }
    }
}
