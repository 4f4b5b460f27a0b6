use std::collections::HashMap;
#[cfg(not(target_family = "wasm"))]
use std::io::ErrorKind;
#[cfg(not(target_family = "wasm"))]
use std::path::PathBuf;

use async_trait::async_trait;
#[cfg(not(target_family = "wasm"))]
use tokio::fs;
use tokio::sync::RwLock;
#[cfg(not(target_family = "wasm"))]
use tracing::debug;

use crate::domain::error::DomainError;

/// Key-value backend holding serialized collections.
#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, DomainError>;
    async fn write(&self, key: &str, value: &str) -> Result<(), DomainError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl StoragePort for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside `dir`.
#[cfg(not(target_family = "wasm"))]
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

#[cfg(not(target_family = "wasm"))]
impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(not(target_family = "wasm"))]
#[async_trait]
impl StoragePort for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, DomainError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), DomainError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        debug!(path = %path.display(), bytes = value.len(), "collection written");
        Ok(())
    }
}

/// Browser `localStorage`, holding the raw JSON text under each key.
///
/// Only usable on `wasm32` inside a browser; the simulated latency of
/// [`StoredNewsRepository`](crate::StoredNewsRepository) must stay zero there
/// unless a Tokio time driver is running.
#[cfg(feature = "web")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStorage;

#[cfg(feature = "web")]
#[async_trait]
impl StoragePort for BrowserStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, DomainError> {
        use gloo_storage::{LocalStorage, Storage};

        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| DomainError::Storage(format!("localStorage read failed: {e:?}")))
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), DomainError> {
        use gloo_storage::{LocalStorage, Storage};

        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| DomainError::Storage(format!("localStorage write failed: {e:?}")))
    }
}
