//! Error taxonomy. Every subsystem has its own enum; `WikiliteError`
//! unifies them so `?` works across crate boundaries.

mod codec_error;
mod config_error;
mod embedding_error;
mod retrieval_error;
mod storage_error;

pub use codec_error::CodecError;
pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum WikiliteError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias used throughout the workspace.
pub type WikiliteResult<T> = Result<T, WikiliteError>;
