use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Base URL of an OpenAI-compatible API (Ollama serves one under `/v1/`).
    pub base_url: String,
    /// Embedding model name.
    pub model: String,
    /// Bearer token; empty means no `Authorization` header.
    pub api_key: String,
    /// Full embedding dimensions.
    pub dimensions: usize,
    /// Batch size for embedding operations.
    pub batch_size: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Max cached query embeddings; 0 disables the cache.
    pub query_cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_EMBEDDING_BASE_URL.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: String::new(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            timeout_secs: defaults::DEFAULT_EMBEDDING_TIMEOUT_SECS,
            query_cache_size: defaults::DEFAULT_QUERY_CACHE_SIZE,
        }
    }
}
