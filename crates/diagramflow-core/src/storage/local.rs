//! Browser `localStorage` implementation for WebAssembly.

use super::{Storage, StorageError, StorageResult};

/// Storage backed by the page's `window.localStorage`.
///
/// Note: This is intentionally not Send/Sync since WASM is single-threaded
/// and web-sys handles are not thread-safe.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's local storage.
    pub fn new() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))?;

        Ok(Self { storage })
    }
}

impl Storage for LocalStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Other(format!("Get error: {:?}", e)))
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        // Quota errors surface here.
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Io(format!("Set error: {:?}", e)))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Other(format!("Remove error: {:?}", e)))
    }
}
