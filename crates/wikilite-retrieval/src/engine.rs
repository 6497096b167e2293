//! RetrievalEngine: the four search entry points over one storage handle,
//! an optional embedding provider, and a search configuration.

use tracing::debug;

use wikilite_core::config::SearchConfig;
use wikilite_core::errors::{RetrievalError, WikiliteResult};
use wikilite_core::models::{SearchResult, WordMatch};
use wikilite_core::traits::{ICorpusStorage, IEmbeddingProvider};

use crate::search::{ann, fuzzy, lexical};

/// Entry point for every search strategy. Holds borrowed handles only; build
/// one per request or share one across threads.
pub struct RetrievalEngine<'a> {
    storage: &'a dyn ICorpusStorage,
    provider: Option<&'a dyn IEmbeddingProvider>,
    config: SearchConfig,
}

impl<'a> RetrievalEngine<'a> {
    pub fn new(storage: &'a dyn ICorpusStorage, config: SearchConfig) -> Self {
        Self {
            storage,
            provider: None,
            config,
        }
    }

    /// Attach the embedding provider used by vector search.
    pub fn with_provider(mut self, provider: &'a dyn IEmbeddingProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// `limit` if given, otherwise the configured default.
    pub fn limit_or_default(&self, limit: Option<usize>) -> usize {
        limit.unwrap_or(self.config.default_limit)
    }

    pub fn search_title(&self, query: &str, limit: usize) -> WikiliteResult<Vec<SearchResult>> {
        lexical::search_title(self.storage, query, limit)
    }

    pub fn search_content(&self, query: &str, limit: usize) -> WikiliteResult<Vec<SearchResult>> {
        lexical::search_content(self.storage, query, limit)
    }

    /// Vector search. Fails with `SearchFailed` when no provider is attached.
    pub fn search_vectors(&self, query: &str, limit: usize) -> WikiliteResult<Vec<SearchResult>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let provider = self.provider.ok_or_else(|| RetrievalError::SearchFailed {
            reason: "vector search requires an embedding provider".to_string(),
        })?;
        debug!(provider = provider.name(), "dispatching vector search");
        ann::search_vectors(self.storage, provider, &self.config, query, limit)
    }

    pub fn search_word_distance(&self, term: &str, limit: usize) -> WikiliteResult<Vec<WordMatch>> {
        fuzzy::search_word_distance(self.storage, &self.config, term, limit)
    }
}
