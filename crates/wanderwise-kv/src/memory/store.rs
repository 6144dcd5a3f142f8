//! In-memory key-value store using the moka crate.

use async_trait::async_trait;
use moka::future::Cache;

use wanderwise_core::config::MemoryStoreConfig;
use wanderwise_core::result::AppResult;
use wanderwise_core::traits::KeyValueStore;

/// In-memory key-value store. Contents are lost when the process exits.
#[derive(Debug, Clone)]
pub struct MemoryKvStore {
    cache: Cache<String, String>,
}

impl MemoryKvStore {
    /// Create a new store from configuration.
    pub fn new(config: &MemoryStoreConfig) -> Self {
        let cache = Cache::builder().max_capacity(config.max_capacity).build();
        Self { cache }
    }
}

impl Default for MemoryKvStore {
    fn default() -> Self {
        Self::new(&MemoryStoreConfig::default())
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryKvStore::default();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let store = MemoryKvStore::default();
        store.set_json("n", &vec![1, 2, 3]).await.unwrap();
        let back: Option<Vec<i32>> = store.get_json("n").await.unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));
    }
}
