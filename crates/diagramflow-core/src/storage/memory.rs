//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// List all stored keys.
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        let entries = self.entries.read().map_err(|e| {
            StorageError::Other(format!("Lock error: {}", e))
        })?;
        Ok(entries.keys().cloned().collect())
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(|e| {
            StorageError::Other(format!("Lock error: {}", e))
        })?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|e| {
            StorageError::Other(format!("Lock error: {}", e))
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|e| {
            StorageError::Other(format!("Lock error: {}", e))
        })?;
        entries.remove(key);
        Ok(())
    }
}
