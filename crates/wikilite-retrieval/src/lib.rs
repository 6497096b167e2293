//! # wikilite-retrieval
//!
//! The query side of wikilite. Four independent strategies over an
//! [`ICorpusStorage`](wikilite_core::traits::ICorpusStorage):
//!
//! - title and content lexical search (FTS5 BM25, lower is better)
//! - two-stage vector search: Hamming scan over sign-quantized chunks, then
//!   exact Euclidean rerank of the survivors
//! - fuzzy single-term search by edit distance over the vocabulary
//!
//! Results are never fused; callers pick a strategy per query.

pub mod engine;
pub mod ranking;
pub mod search;

pub use engine::RetrievalEngine;
pub use ranking::topk::BoundedSelector;
