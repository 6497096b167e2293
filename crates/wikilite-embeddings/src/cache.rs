//! In-memory query embedding cache using moka.
//!
//! Interactive search re-embeds the same query text often (paging, retries,
//! switching strategies). Keys are blake3 hashes of the exact text sent to the
//! provider, so a change of query prefix never aliases.

use std::time::Duration;

use moka::sync::Cache;
use tracing::trace;

use wikilite_core::config::EmbeddingConfig;
use wikilite_core::errors::WikiliteResult;
use wikilite_core::traits::IEmbeddingProvider;

use crate::providers::OpenAiCompatProvider;

/// Wraps a provider with a bounded TinyLFU cache for single-text embeds.
/// Batch calls pass straight through.
pub struct CachedProvider<P> {
    inner: P,
    cache: Cache<String, Vec<f32>>,
}

impl<P: IEmbeddingProvider> CachedProvider<P> {
    /// Create a cache holding at most `max_entries` embeddings.
    pub fn new(inner: P, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self { inner, cache }
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Number of cached embeddings.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }
}

impl CachedProvider<OpenAiCompatProvider> {
    /// The configured HTTP provider behind a cache of `query_cache_size`.
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self::new(
            OpenAiCompatProvider::new(config),
            config.query_cache_size,
        )
    }
}

impl<P: IEmbeddingProvider> IEmbeddingProvider for CachedProvider<P> {
    fn embed(&self, text: &str) -> WikiliteResult<Vec<f32>> {
        let key = Self::key(text);
        if let Some(hit) = self.cache.get(&key) {
            trace!("query embedding cache hit");
            return Ok(hit);
        }
        // Failures are not cached.
        let embedding = self.inner.embed(text)?;
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    fn embed_batch(&self, texts: &[String]) -> WikiliteResult<Vec<Vec<f32>>> {
        self.inner.embed_batch(texts)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}
