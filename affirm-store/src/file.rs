//! File-backed store adapter.
//!
//! Mirrors an app-group container on disk: the shared values live in one
//! JSON document and each refresh signal leaves a timestamp stamp that a
//! polling renderer can compare against its last draw.
//!
//! ```text
//! <container>/<group_id>/preferences.json
//! <container>/<group_id>/refresh/<renderer>.stamp
//! ```

use crate::error::{StoreError, StoreResult};
use crate::store::SharedStore;
use crate::value::StoreValue;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const PREFERENCES_FILE: &str = "preferences.json";
const REFRESH_DIR: &str = "refresh";

/// Configuration for a [`FileStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStoreConfig {
    /// Directory standing in for the OS shared container. Must exist.
    pub container_path: PathBuf,
    /// App-group identifier; becomes a subdirectory of the container.
    pub group_id: String,
}

impl FileStoreConfig {
    pub const DEFAULT_GROUP_ID: &'static str = "group.app.affirm.widget";

    /// Config for `container_path` with the default group id.
    pub fn new(container_path: impl Into<PathBuf>) -> Self {
        Self {
            container_path: container_path.into(),
            group_id: Self::DEFAULT_GROUP_ID.to_string(),
        }
    }
}

/// A [`SharedStore`] persisted as a JSON document.
///
/// Values are cached after the first load. Writes rewrite the whole
/// document through a temporary file and a rename, so a reader never sees
/// a half-written file.
pub struct FileStore {
    config: FileStoreConfig,
    values: Mutex<Option<BTreeMap<String, StoreValue>>>,
}

impl FileStore {
    /// Creates a store over the configured container.
    pub fn new(config: FileStoreConfig) -> Self {
        Self {
            config,
            values: Mutex::new(None),
        }
    }

    /// The app-group directory inside the container.
    pub fn group_dir(&self) -> PathBuf {
        self.config.container_path.join(&self.config.group_id)
    }

    /// Path of the shared preferences document.
    pub fn preferences_path(&self) -> PathBuf {
        self.group_dir().join(PREFERENCES_FILE)
    }

    fn stamp_path(&self, renderer: &str) -> PathBuf {
        self.group_dir()
            .join(REFRESH_DIR)
            .join(format!("{renderer}.stamp"))
    }

    /// Returns whether the container directory exists.
    pub fn is_available(&self) -> bool {
        self.config.container_path.is_dir()
    }

    /// When `renderer` was last signalled, if ever.
    pub async fn last_refresh(&self, renderer: &str) -> StoreResult<Option<DateTime<Utc>>> {
        self.ensure_group_dir().await?;
        let path = self.stamp_path(renderer);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|ts| Some(ts.with_timezone(&Utc)))
            .map_err(|e| StoreError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    async fn ensure_group_dir(&self) -> StoreResult<PathBuf> {
        if !self.is_available() {
            return Err(StoreError::Unavailable(format!(
                "container {} does not exist",
                self.config.container_path.display()
            )));
        }
        let dir = self.group_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir).await?;
            info!("Created app-group directory: {:?}", dir);
        }
        Ok(dir)
    }

    async fn load(&self, path: &Path) -> StoreResult<BTreeMap<String, StoreValue>> {
        match fs::read(path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, values: &BTreeMap<String, StoreValue>) -> StoreResult<()> {
        let path = self.preferences_path();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(values)?).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Applies `update` to the cached map and persists the result.
    ///
    /// The lock is held across the write so concurrent updates are applied
    /// one document at a time. An unparseable document is replaced rather
    /// than blocking every later write.
    async fn update<F>(&self, key: &str, update: F) -> StoreResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, StoreValue>) + Send,
    {
        self.ensure_group_dir().await?;
        let mut guard = self.values.lock().await;
        if guard.is_none() {
            let path = self.preferences_path();
            let loaded = match self.load(&path).await {
                Ok(values) => values,
                Err(StoreError::Serialization(e)) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Unreadable preferences document, starting empty"
                    );
                    BTreeMap::new()
                }
                Err(e) => return Err(e),
            };
            *guard = Some(loaded);
        }
        let values = guard.get_or_insert_with(BTreeMap::new);
        let mut next = values.clone();
        update(&mut next);
        self.persist(&next).await.map_err(|e| StoreError::WriteFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        *values = next;
        Ok(())
    }

    async fn read_all(&self) -> StoreResult<BTreeMap<String, StoreValue>> {
        self.ensure_group_dir().await?;
        let mut guard = self.values.lock().await;
        if guard.is_none() {
            *guard = Some(self.load(&self.preferences_path()).await?);
        }
        Ok(guard.get_or_insert_with(BTreeMap::new).clone())
    }
}

#[async_trait]
impl SharedStore for FileStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn get(&self, key: &str) -> StoreResult<Option<StoreValue>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: StoreValue) -> StoreResult<()> {
        // JSON has no representation for NaN or infinity.
        if matches!(value, StoreValue::Float(x) if !x.is_finite()) {
            return Err(StoreError::WriteFailed {
                key: key.to_string(),
                reason: format!("{value} cannot be stored as JSON"),
            });
        }
        let owned = key.to_string();
        self.update(key, move |values| {
            values.insert(owned, value);
        })
        .await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.update(key, |values| {
            values.remove(key);
        })
        .await
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.read_all().await?.into_keys().collect())
    }

    async fn notify(&self, renderer: &str) -> StoreResult<()> {
        if renderer.is_empty() || renderer.contains(['/', '\\']) || renderer.starts_with('.') {
            return Err(StoreError::NotifyFailed {
                renderer: renderer.to_string(),
                reason: "invalid renderer name".to_string(),
            });
        }
        let dir = self.ensure_group_dir().await?.join(REFRESH_DIR);
        fs::create_dir_all(&dir).await?;
        let now = Utc::now().to_rfc3339();
        fs::write(self.stamp_path(renderer), now.as_bytes())
            .await
            .map_err(|e| StoreError::NotifyFailed {
                renderer: renderer.to_string(),
                reason: e.to_string(),
            })?;
        debug!(renderer, "Wrote refresh stamp");
        Ok(())
    }
}
