//! Engine configuration
//!
//! Synonym tables and display settings, loaded once at startup from an
//! optional JSON file named by `NUTRISAFE_CONFIG_PATH`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::nutrition::SynonymTable;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "NUTRISAFE_CONFIG_PATH";

/// Items per page in nutrient display lists
pub const DEFAULT_DISPLAY_CHUNK_SIZE: usize = 4;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_display_chunk_size() -> usize {
    DEFAULT_DISPLAY_CHUNK_SIZE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub synonyms: SynonymTable,
    #[serde(alias = "display_chunk_size")]
    pub display_chunk_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            synonyms: SynonymTable::default(),
            display_chunk_size: default_display_chunk_size(),
        }
    }
}

impl EngineConfig {
    /// Load a config file; fields it leaves out keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: EngineConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        if config.display_chunk_size == 0 {
            tracing::warn!("displayChunkSize is 0 in {}; pages will hold 1 item", path.display());
        }
        tracing::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Load from the file named by `NUTRISAFE_CONFIG_PATH`, or use defaults
    pub fn from_env() -> ConfigResult<Self> {
        Self::load(std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
    }

    pub fn load(path: Option<PathBuf>) -> ConfigResult<Self> {
        match path {
            Some(path) if !path.as_os_str().is_empty() => Self::from_file(path),
            _ => {
                tracing::debug!("{} not set; using default engine config", CONFIG_PATH_ENV);
                Ok(Self::default())
            }
        }
    }

    /// Requested page size, falling back to the configured one
    pub fn chunk_size(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.display_chunk_size)
    }
}
