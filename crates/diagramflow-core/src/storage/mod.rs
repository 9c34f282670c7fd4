//! Storage abstraction for persistence.
//!
//! Backends are plain key/value stores holding JSON strings, the shape of
//! browser `localStorage`. [`SnapshotStorage`] layers snapshot
//! (de)serialization on top of any backend.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::state::CanvasSnapshot;
use thiserror::Error;

/// Key the canvas state is stored under.
pub const STORAGE_KEY: &str = "diagramFlow";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Entry not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for key/value storage backends.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Read the value under `key`, if any.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Trait for key/value storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Read the value under `key`, if any.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Snapshot persistence on top of any [`Storage`].
pub trait SnapshotStorage {
    /// Save a snapshot as JSON.
    fn save(&self, key: &str, snapshot: &CanvasSnapshot) -> StorageResult<()>;

    /// Load and parse a snapshot.
    fn load(&self, key: &str) -> StorageResult<CanvasSnapshot>;

    /// Check if anything is stored under `key`.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}

impl<S: Storage + ?Sized> SnapshotStorage for S {
    fn save(&self, key: &str, snapshot: &CanvasSnapshot) -> StorageResult<()> {
        let json = snapshot
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.write(key, &json)
    }

    fn load(&self, key: &str) -> StorageResult<CanvasSnapshot> {
        let json = self
            .read(key)?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        CanvasSnapshot::from_json(&json)
            .map_err(|e| StorageError::Serialization(format!("Failed to parse {}: {}", key, e)))
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.read(key)?.is_some())
    }
}

/// Convenience type alias for platform-specific storage.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = LocalStorage;

/// Create a platform-appropriate storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<PlatformStorage> {
    FileStorage::default_location()
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<PlatformStorage> {
    LocalStorage::new()
}
