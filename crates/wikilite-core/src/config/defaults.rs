// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "wikilite.db";
pub const DEFAULT_MMAP_SIZE: u64 = 268_435_456; // 256 MB
pub const DEFAULT_CACHE_SIZE: i64 = -64_000; // 64 MB (negative = KB)
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_ANN_CHUNK_CAPACITY: usize = 1_000;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_BASE_URL: &str = "http://localhost:11434/v1/";
pub const DEFAULT_EMBEDDING_MODEL: &str = "bge-m3";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1024;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 1_000;
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_QUERY_CACHE_SIZE: u64 = 1_024;

// --- Search ---
pub const DEFAULT_QUERY_PREFIX: &str = "";
pub const DEFAULT_ANN_OVERFETCH: usize = 8;
pub const DEFAULT_VOCABULARY_BATCH_SIZE: usize = 100_000;
pub const DEFAULT_SEARCH_LIMIT: usize = 5;
pub const DEFAULT_PARALLEL_RERANK: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
