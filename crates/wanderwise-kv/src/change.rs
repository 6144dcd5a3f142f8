//! Change notifications for key-value writes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single write observed on the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageChange {
    /// The key that changed.
    pub key: String,
    /// The new value, or `None` when the key was removed.
    pub value: Option<String>,
    /// The handle that made the write.
    pub origin: Uuid,
}

impl StorageChange {
    /// Whether this change removed the key.
    pub fn is_removal(&self) -> bool {
        self.value.is_none()
    }
}
