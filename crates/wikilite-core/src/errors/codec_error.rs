/// Malformed-input errors from the vector codec and distance kernels.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("byte length {len} is not a multiple of 4")]
    InvalidByteLength { len: usize },

    #[error("length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("chunk {chunk_id} has {len} bytes, not a multiple of vector size {vector_size}")]
    MalformedChunk {
        chunk_id: i64,
        len: usize,
        vector_size: usize,
    },
}
