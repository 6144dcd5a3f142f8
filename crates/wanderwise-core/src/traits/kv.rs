//! Persistent key-value store trait used for client-side session state.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for persistent key-value backends (file, in-memory).
///
/// Values are plain strings; callers serialize structured data as JSON.
/// Entries never expire on their own: session validity is decided by the
/// timestamps stored alongside them.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Check that the backend is usable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Get a typed value by deserializing from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key).await? {
            Some(value) => {
                let parsed = serde_json::from_str(&value)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value by serializing to JSON.
    async fn set_json<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T) -> AppResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.set(key, &json).await
    }
}
