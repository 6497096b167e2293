mod embedding;
mod storage;

pub use embedding::IEmbeddingProvider;
pub use storage::ICorpusStorage;
