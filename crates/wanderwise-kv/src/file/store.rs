//! Key-value store persisted as a single JSON object on disk.
//!
//! The file is re-read on every operation so that several processes
//! sharing it observe each other's writes. Writes go to a sibling
//! temporary file that is then renamed over the original, so readers never
//! see a half-written document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use wanderwise_core::error::{AppError, ErrorKind};
use wanderwise_core::result::AppResult;
use wanderwise_core::traits::KeyValueStore;

type Entries = BTreeMap<String, String>;

/// File-backed key-value store.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileKvStore {
    /// Open the store at `path`, creating its parent directory if needed.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create directory {}", parent.display()),
                    e,
                )
            })?;
        }
        debug!(path = %path.display(), "Opened file key-value store");
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> AppResult<Entries> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read {}", self.path.display()),
                    e,
                ));
            }
        };

        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                // An unreadable document holds nothing we can use; start over.
                warn!(path = %self.path.display(), error = %e, "Discarding corrupt key-value file");
                Ok(Entries::new())
            }
        }
    }

    async fn persist(&self, entries: &Entries) -> AppResult<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, json).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write {}", tmp.display()),
                e,
            )
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace {}", self.path.display()),
                e,
            )
        })
    }
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
        }
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        let _guard = self.lock.lock().await;
        let entries = self.load().await?;
        self.persist(&entries).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state/session.json");

        let store = FileKvStore::open(&path).await.unwrap();
        store.set("wanderwise:logged_in", "true").await.unwrap();
        store.set("wanderwise:user", "{\"id\":1}").await.unwrap();
        store.remove("wanderwise:user").await.unwrap();
        drop(store);

        let reopened = FileKvStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("wanderwise:logged_in").await.unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(reopened.get("wanderwise:user").await.unwrap(), None);
        assert!(!dir.path().join("state/session.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileKvStore::open(&path).await.unwrap();
        assert_eq!(store.get("anything").await.unwrap(), None);

        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_two_instances_share_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let a = FileKvStore::open(&path).await.unwrap();
        let b = FileKvStore::open(&path).await.unwrap();
        a.set("wanderwise:logged_in", "true").await.unwrap();
        b.remove("wanderwise:logged_in").await.unwrap();

        assert_eq!(a.get("wanderwise:logged_in").await.unwrap(), None);
    }
}
