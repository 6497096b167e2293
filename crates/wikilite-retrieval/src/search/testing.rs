//! In-memory `ICorpusStorage` for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use wikilite_core::errors::WikiliteResult;
use wikilite_core::models::{AnnChunk, ArticleRef, HashHit, TitleHit, VectorArticle};
use wikilite_core::traits::{ICorpusStorage, IEmbeddingProvider};
use wikilite_embeddings::codec::{f32_to_bytes, quantize_binary};

#[derive(Default)]
pub(crate) struct MemoryCorpus {
    pub titles: Vec<TitleHit>,
    pub first_sections: HashMap<i64, String>,
    pub hashes: Vec<HashHit>,
    pub hash_owners: HashMap<i64, ArticleRef>,
    pub vocabulary: Vec<String>,
    pub chunks: Vec<AnnChunk>,
    pub index: HashMap<(i64, usize), i64>,
    pub vectors: HashMap<i64, Vec<u8>>,
    pub vector_articles: HashMap<i64, VectorArticle>,
    pub calls: AtomicUsize,
}

impl MemoryCorpus {
    /// Pack `vectors` (ids 1..) into chunks of `capacity` and index them.
    pub fn with_vectors(vectors: &[Vec<f32>], capacity: usize) -> Self {
        let mut corpus = Self::default();
        for (chunk_no, group) in vectors.chunks(capacity).enumerate() {
            let chunk_id = chunk_no as i64 + 1;
            let mut data = Vec::new();
            for (position, v) in group.iter().enumerate() {
                let id = (chunk_no * capacity + position) as i64 + 1;
                data.extend(quantize_binary(v));
                corpus.index.insert((chunk_id, position), id);
                corpus.vectors.insert(id, f32_to_bytes(v));
                corpus.vector_articles.insert(
                    id,
                    VectorArticle {
                        article: ArticleRef {
                            id: id * 10,
                            title: format!("Article {id}"),
                        },
                        text: Some(format!("passage {id}")),
                    },
                );
            }
            corpus.chunks.push(AnnChunk { id: chunk_id, data });
        }
        corpus
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }
}

impl ICorpusStorage for MemoryCorpus {
    fn search_titles(&self, _query: &str, limit: usize) -> WikiliteResult<Vec<TitleHit>> {
        self.tick();
        Ok(self.titles.iter().take(limit).cloned().collect())
    }

    fn first_section_text(&self, article_id: i64) -> WikiliteResult<Option<String>> {
        self.tick();
        Ok(self.first_sections.get(&article_id).cloned())
    }

    fn search_hashes(&self, _query: &str, limit: usize) -> WikiliteResult<Vec<HashHit>> {
        self.tick();
        Ok(self.hashes.iter().take(limit).cloned().collect())
    }

    fn article_for_hash(&self, hash_id: i64) -> WikiliteResult<Option<ArticleRef>> {
        self.tick();
        Ok(self.hash_owners.get(&hash_id).cloned())
    }

    fn vocabulary_batch(&self, offset: usize, limit: usize) -> WikiliteResult<Vec<String>> {
        self.tick();
        Ok(self.vocabulary.iter().skip(offset).take(limit).cloned().collect())
    }

    fn for_each_ann_chunk(
        &self,
        visit: &mut dyn FnMut(AnnChunk) -> WikiliteResult<()>,
    ) -> WikiliteResult<()> {
        self.tick();
        for chunk in &self.chunks {
            visit(chunk.clone())?;
        }
        Ok(())
    }

    fn ann_vector_id(&self, chunk_id: i64, position: usize) -> WikiliteResult<Option<i64>> {
        self.tick();
        Ok(self.index.get(&(chunk_id, position)).copied())
    }

    fn vector_embedding(&self, vector_id: i64) -> WikiliteResult<Option<Vec<u8>>> {
        self.tick();
        Ok(self.vectors.get(&vector_id).cloned())
    }

    fn article_for_vector(&self, vector_id: i64) -> WikiliteResult<Option<VectorArticle>> {
        self.tick();
        Ok(self.vector_articles.get(&vector_id).cloned())
    }
}

/// Returns a fixed embedding for every text.
pub(crate) struct FixedProvider {
    pub embedding: Vec<f32>,
    pub calls: AtomicUsize,
}

impl FixedProvider {
    pub fn new(embedding: Vec<f32>) -> Self {
        Self {
            embedding,
            calls: AtomicUsize::new(0),
        }
    }
}

impl IEmbeddingProvider for FixedProvider {
    fn embed(&self, _text: &str) -> WikiliteResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.embedding.clone())
    }

    fn embed_batch(&self, texts: &[String]) -> WikiliteResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.embedding.len()
    }

    fn name(&self) -> &str {
        "fixed"
    }

    fn is_available(&self) -> bool {
        true
    }
}
