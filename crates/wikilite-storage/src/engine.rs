//! StorageEngine: owns the ConnectionPool, implements ICorpusStorage,
//! runs migrations at startup.

use std::path::{Path, PathBuf};

use tracing::debug;

use wikilite_core::config::StorageConfig;
use wikilite_core::errors::WikiliteResult;
use wikilite_core::models::{AnnChunk, ArticleRef, HashHit, TitleHit, VectorArticle};
use wikilite_core::traits::ICorpusStorage;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::ann_build::{self, AnnBuildStats};
use crate::queries::maintenance::{self, CorpusStats};
use crate::queries::{ann_search, lexical_search, vocabulary};

const IN_MEMORY_PATH: &str = ":memory:";

/// The corpus store. Reads go through the read pool when file-backed.
///
/// The synchronous methods take the writer with `blocking_lock`, which panics
/// on a tokio worker thread. Async callers wrap them in
/// `tokio::task::spawn_blocking` or use [`crate::pool::WriteConnection::with_conn`].
pub struct StorageEngine {
    pool: ConnectionPool,
    config: StorageConfig,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk with default settings.
    pub fn open(path: &Path) -> WikiliteResult<Self> {
        Self::open_with_config(path, StorageConfig::default())
    }

    /// Open a file-backed engine with explicit pool and pragma settings.
    pub fn open_with_config(path: &Path, config: StorageConfig) -> WikiliteResult<Self> {
        let pool = ConnectionPool::open(path, &config)?;
        let engine = Self {
            pool,
            config,
            use_read_pool: true,
        };
        engine.initialize()?;
        debug!(path = %path.display(), readers = engine.pool.readers.size(), "opened corpus store");
        Ok(engine)
    }

    /// Open the database named by `config.db_path`. `":memory:"` opens an
    /// in-memory store.
    pub fn from_config(config: StorageConfig) -> WikiliteResult<Self> {
        if config.db_path == IN_MEMORY_PATH {
            return Self::open_in_memory_with_config(config);
        }
        let path = PathBuf::from(&config.db_path);
        Self::open_with_config(&path, config)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> WikiliteResult<Self> {
        Self::open_in_memory_with_config(StorageConfig::default())
    }

    fn open_in_memory_with_config(config: StorageConfig) -> WikiliteResult<Self> {
        let pool = ConnectionPool::open_in_memory(&config)?;
        let engine = Self {
            pool,
            config,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations.
    fn initialize(&self) -> WikiliteResult<()> {
        self.pool.writer.with_conn_sync(migrations::run_migrations)
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    /// File-backed: uses the read pool (no writer contention).
    /// In-memory: uses the writer (read pool is isolated).
    fn with_reader<F, T>(&self, f: F) -> WikiliteResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> WikiliteResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }

    /// Run a closure on the write connection (ingestion tooling, fixtures).
    pub fn with_writer<F, T>(&self, f: F) -> WikiliteResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> WikiliteResult<T>,
    {
        self.pool.writer.with_conn_sync(f)
    }

    /// Re-quantize every stored vector into chunks of the configured capacity.
    pub fn rebuild_ann_index(&self) -> WikiliteResult<AnnBuildStats> {
        let capacity = self.config.ann_chunk_capacity;
        self.with_writer(|conn| ann_build::rebuild_ann_index(conn, capacity))
    }

    /// Merge FTS5 segments and VACUUM.
    pub fn optimize(&self) -> WikiliteResult<()> {
        self.with_writer(maintenance::optimize)
    }

    /// Row counts across the corpus tables.
    pub fn stats(&self) -> WikiliteResult<CorpusStats> {
        self.with_reader(maintenance::corpus_stats)
    }
}

impl ICorpusStorage for StorageEngine {
    fn search_titles(&self, query: &str, limit: usize) -> WikiliteResult<Vec<TitleHit>> {
        self.with_reader(|conn| lexical_search::search_titles(conn, query, limit))
    }

    fn first_section_text(&self, article_id: i64) -> WikiliteResult<Option<String>> {
        self.with_reader(|conn| lexical_search::first_section_text(conn, article_id))
    }

    fn search_hashes(&self, query: &str, limit: usize) -> WikiliteResult<Vec<HashHit>> {
        self.with_reader(|conn| lexical_search::search_hashes(conn, query, limit))
    }

    fn article_for_hash(&self, hash_id: i64) -> WikiliteResult<Option<ArticleRef>> {
        self.with_reader(|conn| lexical_search::article_for_hash(conn, hash_id))
    }

    fn vocabulary_batch(&self, offset: usize, limit: usize) -> WikiliteResult<Vec<String>> {
        self.with_reader(|conn| vocabulary::vocabulary_batch(conn, offset, limit))
    }

    fn for_each_ann_chunk(
        &self,
        visit: &mut dyn FnMut(AnnChunk) -> WikiliteResult<()>,
    ) -> WikiliteResult<()> {
        self.with_reader(|conn| ann_search::for_each_chunk(conn, visit))
    }

    fn ann_vector_id(&self, chunk_id: i64, position: usize) -> WikiliteResult<Option<i64>> {
        self.with_reader(|conn| ann_search::vector_id_at(conn, chunk_id, position))
    }

    fn vector_embedding(&self, vector_id: i64) -> WikiliteResult<Option<Vec<u8>>> {
        self.with_reader(|conn| ann_search::embedding_blob(conn, vector_id))
    }

    fn article_for_vector(&self, vector_id: i64) -> WikiliteResult<Option<VectorArticle>> {
        self.with_reader(|conn| ann_search::article_for_vector(conn, vector_id))
    }
}
