/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("no ANN index entry for chunk {chunk_id} position {position}")]
    AnnIndexMissing { chunk_id: i64, position: usize },

    #[error("vector {id} not found")]
    VectorNotFound { id: i64 },
}
