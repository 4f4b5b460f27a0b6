use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::data::storage::StoragePort;
use crate::domain::error::DomainError;
use crate::domain::news::NewsItem;

pub const DEFAULT_STORAGE_KEY: &str = "news_items";

#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<NewsItem>, DomainError>;
    async fn get(&self, id: &str) -> Result<NewsItem, DomainError>;
    async fn insert(&self, item: NewsItem) -> Result<NewsItem, DomainError>;
    async fn remove(&self, id: &str) -> Result<(), DomainError>;
    async fn replace(&self, id: &str, item: NewsItem) -> Result<NewsItem, DomainError>;
}

/// Keeps the whole collection as one JSON array under a single storage key.
///
/// Every call loads the array, works on it in memory and writes it back.
/// The cycle runs under a mutex, so concurrent callers sharing one
/// repository never lose each other's writes.
pub struct StoredNewsRepository<S: StoragePort> {
    storage: S,
    key: String,
    latency: Duration,
    lock: Mutex<()>,
}

impl<S: StoragePort> StoredNewsRepository<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: DEFAULT_STORAGE_KEY.to_string(),
            latency: Duration::ZERO,
            lock: Mutex::new(()),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Artificial delay applied before every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    async fn load(&self) -> Result<Vec<NewsItem>, DomainError> {
        match self.storage.read(&self.key).await? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                error!(key = %self.key, "stored news collection is corrupt: {}", e);
                DomainError::Storage(format!(
                    "stored news collection under `{}` is corrupt: {}",
                    self.key, e
                ))
            }),
        }
    }

    async fn save(&self, items: &[NewsItem]) -> Result<(), DomainError> {
        let raw = serde_json::to_string(items)?;
        self.storage.write(&self.key, &raw).await
    }
}

fn position(items: &[NewsItem], id: &str) -> Result<usize, DomainError> {
    items
        .iter()
        .position(|item| item.id == id)
        .ok_or_else(|| DomainError::NotFound(id.to_string()))
}

#[async_trait]
impl<S: StoragePort> NewsRepository for StoredNewsRepository<S> {
    async fn list(&self) -> Result<Vec<NewsItem>, DomainError> {
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn get(&self, id: &str) -> Result<NewsItem, DomainError> {
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        let index = position(&items, id)?;
        Ok(items.swap_remove(index))
    }

    async fn insert(&self, item: NewsItem) -> Result<NewsItem, DomainError> {
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(DomainError::Storage(format!(
                "news item with id {} already exists",
                item.id
            )));
        }

        items.push(item.clone());
        self.save(&items).await?;

        info!(news_id = %item.id, title = %item.title, "news created");
        Ok(item)
    }

    async fn remove(&self, id: &str) -> Result<(), DomainError> {
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        let index = position(&items, id)?;
        items.remove(index);
        self.save(&items).await?;

        info!(news_id = %id, "news deleted");
        Ok(())
    }

    async fn replace(&self, id: &str, item: NewsItem) -> Result<NewsItem, DomainError> {
        self.simulate_latency().await;
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        let index = position(&items, id)?;
        if item.id != id {
            return Err(DomainError::Storage(format!(
                "cannot replace news item {} with a record carrying id {}",
                id, item.id
            )));
        }
        items[index] = item.clone();
        self.save(&items).await?;

        info!(news_id = %id, "news updated");
        Ok(item)
    }
}
