//! Application configuration.

use crate::cli::Cli;
use chromacraft_core::storage::FileStorage;
use chromacraft_core::{ExtractionConfig, DEFAULT_RECENT_LIMIT, PALETTES_KEY};
use std::path::PathBuf;

/// Fallback data directory when the platform one cannot be determined.
const FALLBACK_DATA_DIR: &str = ".chromacraft";

/// Runtime configuration, built from defaults and command-line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the persisted palette collection.
    pub data_dir: PathBuf,
    /// Storage key of the palette collection.
    pub storage_key: String,
    /// Image extraction policy.
    pub extraction: ExtractionConfig,
    /// Number of palettes `list` shows by default.
    pub recent_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = FileStorage::default_dir().unwrap_or_else(|e| {
            log::warn!("{}; using {}", e, FALLBACK_DATA_DIR);
            PathBuf::from(FALLBACK_DATA_DIR)
        });
        Self {
            data_dir,
            storage_key: PALETTES_KEY.to_string(),
            extraction: ExtractionConfig::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl AppConfig {
    /// Defaults with any command-line overrides applied.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::default();
        if let Some(dir) = &cli.data_dir {
            config.data_dir = dir.clone();
        }
        config
    }
}
