//! Browser `localStorage` implementation for WebAssembly.
//!
//! `localStorage` only holds strings, so values must be UTF-8. Palette
//! collections are JSON, which always is.

use super::{Storage, StorageError, StorageResult};

/// `window.localStorage`-backed storage.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Bind to the window's `localStorage`.
    pub fn new() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))?;
        Ok(Self { inner })
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        self.inner
            .get_item(key)
            .map(|value| value.map(String::into_bytes))
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))
    }

    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let text = std::str::from_utf8(value)
            .map_err(|e| StorageError::Serialization(format!("Value is not UTF-8: {}", e)))?;
        self.inner
            .set_item(key, text)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {:?}", key, e)))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.inner
            .remove_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to delete {}: {:?}", key, e)))
    }
}
