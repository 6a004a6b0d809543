//! Helpers behind the `affirm-widget` development CLI.
//!
//! The CLI stands in for the app on a desktop: it publishes through the
//! same [`WidgetSync`] code into a [`FileStore`] container, and reads the
//! container back the way a widget renderer would.

use affirm_store::{FileStore, FileStoreConfig, SharedStore, StoreValue};
use affirm_types::{decode_list, Affirmation, Platform, WidgetSnapshot};
use affirm_widget::{KeySchema, WidgetSync, WidgetSyncConfig};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Loads the sync config, applying a platform override.
///
/// Without a file the defaults are used.
pub fn load_config(path: Option<&Path>, platform: Option<Platform>) -> Result<WidgetSyncConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            WidgetSyncConfig::from_json(&raw).context("Invalid widget sync config")?
        }
        None => WidgetSyncConfig::default(),
    };
    if let Some(platform) = platform {
        config.platform = platform;
        config.validate().context("Invalid widget sync config")?;
    }
    Ok(config)
}

/// Opens the container at `store_dir` and builds an orchestrator over it.
pub fn open_sync(store_dir: &Path, config: WidgetSyncConfig) -> Result<(Arc<FileStore>, WidgetSync)> {
    if !store_dir.is_dir() {
        fs::create_dir_all(store_dir)
            .with_context(|| format!("Failed to create container {}", store_dir.display()))?;
    }
    let store = Arc::new(FileStore::new(FileStoreConfig::new(store_dir)));
    let sync = WidgetSync::new(store.clone(), config).context("Failed to set up widget sync")?;
    Ok((store, sync))
}

/// Reads an affirmation list from a JSON file.
pub fn load_items(path: &Path) -> Result<Vec<Affirmation>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read items {}", path.display()))?;
    decode_list(&raw).with_context(|| format!("{} is not an affirmation list", path.display()))
}

/// What `show` prints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetStatus {
    pub platform: Platform,
    pub renderer: String,
    pub consistent: bool,
    pub last_refresh: Option<DateTime<Utc>>,
    pub snapshot: WidgetSnapshot,
}

/// Reads the container as the configured renderer would.
pub async fn widget_status(store: &FileStore, sync: &WidgetSync) -> Result<WidgetStatus> {
    let renderer = sync.config().renderer_id().to_string();
    let last_refresh = store
        .last_refresh(&renderer)
        .await
        .context("Failed to read refresh stamp")?;
    let snapshot = sync.read_snapshot().await;
    Ok(WidgetStatus {
        platform: sync.config().platform,
        renderer,
        consistent: snapshot.is_consistent(),
        last_refresh,
        snapshot,
    })
}

/// One stored key, labelled with its field when the schema knows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DumpEntry {
    pub key: String,
    pub field: Option<String>,
    pub value: Option<StoreValue>,
}

/// Lists every schema key plus any stray keys found in the container.
pub async fn dump(store: &dyn SharedStore, schema: &KeySchema) -> Result<Vec<DumpEntry>> {
    let mut entries = Vec::new();
    for record in schema.records() {
        entries.push(DumpEntry {
            key: record.key.to_string(),
            field: Some(record.field.to_string()),
            value: store.get(record.key).await?,
        });
    }
    for key in store.keys().await? {
        if schema.field_for_key(&key).is_none() {
            let value = store.get(&key).await?;
            entries.push(DumpEntry {
                key,
                field: None,
                value,
            });
        }
    }
    Ok(entries)
}

/// Renders dump entries as aligned text lines.
pub fn format_dump(entries: &[DumpEntry]) -> String {
    let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|e| {
            let value = e
                .value
                .as_ref()
                .map_or_else(|| "<absent>".to_string(), ToString::to_string);
            let field = e.field.as_deref().unwrap_or("?");
            format!("{:width$}  {:16} {}", e.key, field, value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

