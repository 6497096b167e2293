//! Test fixture loader for wikilite integration tests.
//!
//! Provides the sample corpus (`data/corpus.json`), a seeding helper that
//! builds a fully indexed in-memory store from it, and a deterministic
//! offline embedder so vector search can be exercised without a model.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use wikilite_core::errors::WikiliteResult;
use wikilite_core::traits::IEmbeddingProvider;
use wikilite_embeddings::codec::normalize_one;
use wikilite_storage::queries::{ann_build, corpus_ops};
use wikilite_storage::StorageEngine;

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

// ---------------------------------------------------------------------------
// Corpus fixture
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SectionFixture {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleFixture {
    pub title: String,
    pub sections: Vec<SectionFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusFixture {
    pub dimensions: usize,
    pub ann_chunk_capacity: usize,
    pub articles: Vec<ArticleFixture>,
}

/// A seeded store plus the ids assigned while seeding.
pub struct SeededCorpus {
    pub storage: StorageEngine,
    pub embedder: HashEmbedder,
    /// Article title → article id.
    pub articles: HashMap<String, i64>,
    /// Passage text → hash id (also the vector id).
    pub passages: HashMap<String, i64>,
}

impl SeededCorpus {
    pub fn article_id(&self, title: &str) -> i64 {
        self.articles[title]
    }

    pub fn passage_id(&self, text: &str) -> i64 {
        self.passages[text]
    }
}

/// Insert every article, section and passage, embed each distinct passage,
/// rebuild the vocabulary from the passage index, and pack the ANN chunks.
pub fn seed(storage: StorageEngine, fixture: &CorpusFixture) -> WikiliteResult<SeededCorpus> {
    let embedder = HashEmbedder::new(fixture.dimensions);
    let mut articles = HashMap::new();
    let mut passages = HashMap::new();

    storage.with_writer(|conn| {
        for article in &fixture.articles {
            let article_id = corpus_ops::insert_article(conn, &article.title)?;
            articles.insert(article.title.clone(), article_id);
            for section in &article.sections {
                let section_id = corpus_ops::insert_section(conn, article_id, &section.title)?;
                let hash_id = corpus_ops::upsert_hash(conn, &section.text)?;
                corpus_ops::link_content(conn, section_id, hash_id)?;
                if passages.insert(section.text.clone(), hash_id).is_none() {
                    corpus_ops::upsert_vector(conn, hash_id, &embedder.embed(&section.text)?)?;
                }
            }
        }
        corpus_ops::rebuild_vocabulary(conn)?;
        ann_build::rebuild_ann_index(conn, fixture.ann_chunk_capacity)?;
        Ok(())
    })?;

    Ok(SeededCorpus {
        storage,
        embedder,
        articles,
        passages,
    })
}

/// The sample corpus in a fresh in-memory store.
///
/// # Panics
/// Panics if the fixture can't be loaded or seeded.
pub fn sample_corpus() -> SeededCorpus {
    // Honors WIKILITE_LOG; a no-op after the first call in a test binary.
    wikilite_core::observability::init_tracing();
    let fixture: CorpusFixture = load_fixture("corpus.json");
    let storage = StorageEngine::open_in_memory().expect("in-memory storage");
    seed(storage, &fixture).expect("seed sample corpus")
}

// ---------------------------------------------------------------------------
// Deterministic embedder
// ---------------------------------------------------------------------------

/// Offline embedder: hashes lowercase tokens into signed buckets and
/// L2-normalizes. Identical text always yields an identical vector.
pub struct HashEmbedder {
    dimensions: usize,
    calls: AtomicUsize,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `embed`/`embed_batch` texts processed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut values = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return values;
        }
        for token in text.split_whitespace() {
            let token = token.to_lowercase();
            let digest = blake3::hash(token.as_bytes());
            let bytes = digest.as_bytes();
            let bucket = u64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ]) as usize
                % self.dimensions;
            let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
            values[bucket] += sign;
        }
        normalize_one(&values)
    }
}

impl IEmbeddingProvider for HashEmbedder {
    fn embed(&self, text: &str) -> WikiliteResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> WikiliteResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hash-embedder"
    }

    fn is_available(&self) -> bool {
        true
    }
}
