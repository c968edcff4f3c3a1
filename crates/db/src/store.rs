//! Key-value store abstraction.
//!
//! Every piece of site content lives as one JSON document under a string
//! key. The interface is asynchronous so a network- or file-backed medium
//! can be swapped in, but no implementation offers isolation: concurrent
//! read-modify-write sequences from different callers race, and the last
//! `set_raw` wins.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;
use tvk_common::{AppError, AppResult};

use crate::keys::StoreKey;

/// Shared handle to the configured store.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Storage medium trait.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw string stored under `key`.
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace the value stored under `key`.
    async fn set_raw(&self, key: &str, value: String) -> AppResult<()>;

    /// Remove `key`. Missing keys are not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Check whether `key` holds a value.
    async fn contains(&self, key: &str) -> AppResult<bool> {
        Ok(self.get_raw(key).await?.is_some())
    }
}

/// Read and deserialize the value under `key`.
///
/// Absent keys and values that fail to deserialize both yield `default`;
/// corrupt data is logged and otherwise treated as missing.
pub async fn get_json<T>(store: &dyn KeyValueStore, key: StoreKey, default: T) -> AppResult<T>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.get_raw(key.as_str()).await? else {
        return Ok(default);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Malformed stored value, using default");
            Ok(default)
        }
    }
}

/// Serialize `value` and store it under `key`.
pub async fn set_json<T>(store: &dyn KeyValueStore, key: StoreKey, value: &T) -> AppResult<()>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set_raw(key.as_str(), raw).await
}

/// In-process store.
///
/// Clones share the same map, like tabs sharing one browser profile.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    /// Create an empty store without a size limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes once the total size of
    /// keys and values would exceed `quota_bytes`.
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: String) -> AppResult<()> {
        let mut entries = self.entries.write().await;

        if let Some(quota) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(AppError::Storage(format!(
                    "Quota exceeded writing '{key}': {needed} of {quota} bytes"
                )));
            }
        }

        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// File-backed store: one `<key>.json` file per key.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at `base_path`.
    #[must_use]
    pub const fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::BadRequest(format!("Invalid store key: {key}")));
        }
        Ok(self.base_path.join(format!("{key}.json")))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;

        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn set_raw(&self, key: &str, value: String) -> AppResult<()> {
        let path = self.path_for(key)?;

        tokio::fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create directory: {e}")))?;

        tokio::fs::write(&path, value)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {e}", path.display())))
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to remove {}: {e}",
                path.display()
            ))),
        }
    }
}
