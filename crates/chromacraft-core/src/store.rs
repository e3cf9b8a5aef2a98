//! Persistent collection of saved palettes.
//!
//! The whole collection lives in memory and is written back, as one JSON
//! array under a single key, after every mutation. An empty collection
//! removes the key instead.

use crate::palette::Palette;
use crate::storage::{Storage, StorageError};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Storage key holding the palette collection.
pub const PALETTES_KEY: &str = "chromacraft-palettes";

/// Number of palettes in the "recent" view.
pub const DEFAULT_RECENT_LIMIT: usize = 6;

/// Palette store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Palette not found: {0}")]
    NotFound(String),
    #[error("Failed to serialize palettes: {0}")]
    Serialization(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Saved palettes, backed by a [`Storage`] collaborator.
pub struct PaletteStore<S: Storage> {
    storage: Arc<S>,
    key: String,
    palettes: Vec<Palette>,
}

impl<S: Storage> PaletteStore<S> {
    /// Open the store under the default key.
    pub fn open(storage: Arc<S>) -> Self {
        Self::open_with_key(storage, PALETTES_KEY)
    }

    /// Open the store under `key`.
    ///
    /// Never fails: a missing, unreadable or corrupt collection opens empty.
    pub fn open_with_key(storage: Arc<S>, key: &str) -> Self {
        let palettes = match storage.get(key) {
            Ok(Some(bytes)) => decode_collection(&bytes),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Failed to read saved palettes, starting empty: {}", e);
                Vec::new()
            }
        };
        log::debug!("Opened palette store '{}' with {} palettes", key, palettes.len());

        Self {
            storage,
            key: key.to_string(),
            palettes,
        }
    }

    /// Save a palette, assigning it a fresh id and timestamp.
    ///
    /// A blank name becomes `Palette <n>`.
    pub fn save(&mut self, mut palette: Palette) -> StoreResult<Palette> {
        palette.id = Uuid::new_v4().to_string();
        palette.created = Utc::now();
        if palette.name.trim().is_empty() {
            palette.name = format!("Palette {}", self.palettes.len() + 1);
        }

        self.palettes.push(palette.clone());
        if let Err(e) = self.persist() {
            self.palettes.pop();
            return Err(e);
        }

        log::info!("Saved palette '{}' ({})", palette.name, palette.id);
        Ok(palette)
    }

    /// All palettes, oldest first.
    pub fn list(&self) -> &[Palette] {
        &self.palettes
    }

    /// The last `limit` palettes saved, oldest first.
    pub fn recent(&self, limit: usize) -> &[Palette] {
        let start = self.palettes.len().saturating_sub(limit);
        &self.palettes[start..]
    }

    /// Look up a palette by id.
    pub fn load(&self, id: &str) -> StoreResult<&Palette> {
        self.palettes
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Remove a palette, returning it.
    pub fn delete(&mut self, id: &str) -> StoreResult<Palette> {
        let index = self
            .palettes
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let removed = self.palettes.remove(index);
        if let Err(e) = self.persist() {
            self.palettes.insert(index, removed);
            return Err(e);
        }

        log::info!("Deleted palette '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Storage key this store writes to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    fn persist(&self) -> StoreResult<()> {
        if self.palettes.is_empty() {
            self.storage.remove(&self.key)?;
            return Ok(());
        }
        let bytes = serde_json::to_vec(&self.palettes)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.storage.set(&self.key, &bytes)?;
        Ok(())
    }
}

/// Decode a stored collection, dropping records that no longer parse.
fn decode_collection(bytes: &[u8]) -> Vec<Palette> {
    let records: Vec<Value> = match serde_json::from_slice(bytes) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("Saved palettes are corrupt, starting empty: {}", e);
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value(record) {
            Ok(palette) => Some(palette),
            Err(e) => {
                log::warn!("Skipping unreadable saved palette #{}: {}", i, e);
                None
            }
        })
        .collect()
}
