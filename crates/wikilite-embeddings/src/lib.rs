//! # wikilite-embeddings
//!
//! Everything the ANN stage needs to be bit-exact about vectors:
//! sign-bit quantization, little-endian f32 packing, L2 normalization,
//! Matryoshka prefix extraction, and the distance kernels. Also the HTTP
//! embedding provider and a query-embedding cache in front of it.

pub mod cache;
pub mod codec;
pub mod distance;
pub mod providers;

pub use cache::CachedProvider;
pub use providers::OpenAiCompatProvider;
