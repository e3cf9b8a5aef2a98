//! Key-value persistence collaborator.
//!
//! The palette store only needs to read and write one serialized blob under a
//! fixed key. Backends decide where that blob lives: memory, a directory of
//! JSON files, or the browser's `localStorage`.

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

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for raw key-value storage backends.
///
/// A missing key is `Ok(None)`, not an error.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Read the bytes stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Replace the bytes stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Trait for raw key-value storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Read the bytes stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Replace the bytes stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Convenience type alias for platform-specific storage.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = LocalStorage;
