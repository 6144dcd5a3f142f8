//! Key-value store manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{info, trace};
use uuid::Uuid;

use wanderwise_core::config::{StorageConfig, StorageProvider};
use wanderwise_core::result::AppResult;
use wanderwise_core::traits::KeyValueStore;

use crate::change::StorageChange;
use crate::file::FileKvStore;
use crate::memory::MemoryKvStore;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Owns the configured store and the change broadcast.
#[derive(Debug, Clone)]
pub struct KvStoreManager {
    inner: Arc<dyn KeyValueStore>,
    changes: broadcast::Sender<StorageChange>,
}

impl KvStoreManager {
    /// Create a manager from configuration.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let inner: Arc<dyn KeyValueStore> = match config.provider {
            StorageProvider::File => {
                info!(path = %config.path, "Initializing file key-value store");
                Arc::new(FileKvStore::open(&config.path).await?)
            }
            StorageProvider::Memory => {
                info!("Initializing in-memory key-value store");
                Arc::new(MemoryKvStore::new(&config.memory))
            }
        };
        Ok(Self::from_store(inner))
    }

    /// Create a manager around an existing store (for testing).
    pub fn from_store(store: Arc<dyn KeyValueStore>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            inner: store,
            changes,
        }
    }

    /// Create a handle with its own origin id.
    pub fn handle(&self) -> StorageHandle {
        StorageHandle {
            origin: Uuid::new_v4(),
            inner: Arc::clone(&self.inner),
            changes: self.changes.clone(),
        }
    }

    /// Receive every change made through any handle from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StorageChange> {
        self.changes.subscribe()
    }
}

/// A view of the store that tags its writes with an origin id.
#[derive(Debug, Clone)]
pub struct StorageHandle {
    origin: Uuid,
    inner: Arc<dyn KeyValueStore>,
    changes: broadcast::Sender<StorageChange>,
}

impl StorageHandle {
    /// Origin id attached to this handle's writes.
    pub fn origin(&self) -> Uuid {
        self.origin
    }

    /// Receive changes made through any handle of the same manager.
    pub fn subscribe(&self) -> broadcast::Receiver<StorageChange> {
        self.changes.subscribe()
    }

    fn publish(&self, key: &str, value: Option<&str>) {
        let change = StorageChange {
            key: key.to_string(),
            value: value.map(str::to_string),
            origin: self.origin,
        };
        // No subscribers is the common case outside long-running sessions.
        if self.changes.send(change).is_err() {
            trace!(key, "No storage change subscribers");
        }
    }
}

#[async_trait]
impl KeyValueStore for StorageHandle {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set(key, value).await?;
        self.publish(key, Some(value));
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.inner.remove(key).await?;
        self.publish(key, None);
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handles_share_data_and_broadcast_with_origin() {
        let manager = KvStoreManager::from_store(Arc::new(MemoryKvStore::default()));
        let a = manager.handle();
        let b = manager.handle();
        assert_ne!(a.origin(), b.origin());

        let mut rx = manager.subscribe();
        a.set("wanderwise:logged_in", "true").await.unwrap();
        b.remove("wanderwise:logged_in").await.unwrap();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.origin, a.origin());
        assert_eq!(first.value.as_deref(), Some("true"));

        let second = rx.recv().await.unwrap();
        assert_eq!(second.origin, b.origin());
        assert!(second.is_removal());

        assert_eq!(a.get("wanderwise:logged_in").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_provider_from_config() {
        let config = StorageConfig {
            provider: StorageProvider::Memory,
            ..StorageConfig::default()
        };
        let manager = KvStoreManager::new(&config).await.unwrap();
        let handle = manager.handle();
        assert!(handle.health_check().await.unwrap());
    }
}
