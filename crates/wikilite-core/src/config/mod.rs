//! Configuration, loadable from TOML. Every section falls back to its
//! defaults when omitted.

pub mod defaults;
mod embedding_config;
mod search_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use search_config::{SearchConfig, SelectionPolicy};
pub use storage_config::StorageConfig;

use crate::errors::{ConfigError, WikiliteResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiliteConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub search: SearchConfig,
}

impl WikiliteConfig {
    /// Parse a TOML document, then validate it.
    pub fn from_toml_str(s: &str) -> WikiliteResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> WikiliteResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject values the search pipeline cannot run with.
    pub fn validate(&self) -> WikiliteResult<()> {
        if self.search.ann_overfetch == 0 {
            return Err(invalid("search.ann_overfetch", "must be at least 1"));
        }
        if self.search.vocabulary_batch_size == 0 {
            return Err(invalid("search.vocabulary_batch_size", "must be at least 1"));
        }
        if self.embedding.dimensions == 0 {
            return Err(invalid("embedding.dimensions", "must be at least 1"));
        }
        if self.storage.ann_chunk_capacity == 0 {
            return Err(invalid("storage.ann_chunk_capacity", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> crate::errors::WikiliteError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
