//! Two-stage vector search.
//!
//! 1. Embed `query_prefix + query` and sign-quantize it.
//! 2. Coarse: Hamming distance against every quantized vector in every ANN
//!    chunk, keeping `limit * ann_overfetch` candidates.
//! 3. Resolve each candidate's (chunk, position) to a vector id.
//! 4. Fine: exact Euclidean distance against the stored full-precision
//!    vectors, keeping `limit`.
//! 5. Join survivors to their article and passage text.
//!
//! Results are ascending by Euclidean distance.

use rayon::prelude::*;
use tracing::debug;

use wikilite_core::config::SearchConfig;
use wikilite_core::errors::{CodecError, RetrievalError, WikiliteResult};
use wikilite_core::models::{ResultKind, SearchResult};
use wikilite_core::traits::{ICorpusStorage, IEmbeddingProvider};
use wikilite_embeddings::codec::{bytes_to_f32, quantize_binary};
use wikilite_embeddings::distance::{euclidean, hamming};

use crate::ranking::topk::BoundedSelector;

/// A coarse-stage survivor: a slot in an ANN chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSlot {
    pub chunk_id: i64,
    pub position: usize,
}

/// Nearest passages to `query` by embedding distance.
pub fn search_vectors(
    storage: &dyn ICorpusStorage,
    provider: &dyn IEmbeddingProvider,
    config: &SearchConfig,
    query: &str,
    limit: usize,
) -> WikiliteResult<Vec<SearchResult>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    if config.ann_overfetch == 0 {
        return Err(RetrievalError::SearchFailed {
            reason: "ann_overfetch must be at least 1".to_string(),
        }
        .into());
    }

    let text = format!("{}{}", config.query_prefix, query);
    let query_embedding = provider.embed(&text)?;
    if query_embedding.is_empty() {
        return Err(RetrievalError::SearchFailed {
            reason: format!("provider {} returned an empty embedding", provider.name()),
        }
        .into());
    }

    let ann_limit = limit.saturating_mul(config.ann_overfetch);
    let slots = coarse_scan(storage, &quantize_binary(&query_embedding), ann_limit, config)?;
    let vector_ids = resolve_slots(storage, &slots)?;
    let ranked = rerank(storage, &query_embedding, &vector_ids, limit, config)?;

    let mut results = Vec::with_capacity(ranked.len());
    for (distance, vector_id) in ranked {
        let (article_id, title, text) = match storage.article_for_vector(vector_id)? {
            Some(joined) => (
                joined.article.id,
                joined.article.title,
                joined.text.unwrap_or_default(),
            ),
            None => (0, String::new(), String::new()),
        };
        results.push(SearchResult {
            article_id,
            title,
            text,
            kind: ResultKind::VectorMatch,
            power: distance,
        });
    }

    debug!(
        query,
        limit,
        candidates = slots.len(),
        results = results.len(),
        "vector search"
    );
    Ok(results)
}

/// Hamming scan over every chunk. Survivors come back ascending by distance.
pub fn coarse_scan(
    storage: &dyn ICorpusStorage,
    quantized_query: &[u8],
    ann_limit: usize,
    config: &SearchConfig,
) -> WikiliteResult<Vec<ChunkSlot>> {
    let vector_size = quantized_query.len();
    if vector_size == 0 || ann_limit == 0 {
        return Ok(Vec::new());
    }
    let mut selector = BoundedSelector::new(ann_limit, config.selection);

    storage.for_each_ann_chunk(&mut |chunk| {
        if chunk.data.len() % vector_size != 0 {
            return Err(CodecError::MalformedChunk {
                chunk_id: chunk.id,
                len: chunk.data.len(),
                vector_size,
            }
            .into());
        }
        for (position, quantized) in chunk.data.chunks_exact(vector_size).enumerate() {
            let distance = hamming(quantized_query, quantized)?;
            selector.push(
                f64::from(distance),
                ChunkSlot {
                    chunk_id: chunk.id,
                    position,
                },
            );
        }
        Ok(())
    })?;

    Ok(selector
        .into_sorted()
        .into_iter()
        .map(|(_, slot)| slot)
        .collect())
}

/// Map each slot to its vector id, in slot order.
fn resolve_slots(storage: &dyn ICorpusStorage, slots: &[ChunkSlot]) -> WikiliteResult<Vec<i64>> {
    let mut ids = Vec::with_capacity(slots.len());
    for slot in slots {
        let id = storage
            .ann_vector_id(slot.chunk_id, slot.position)?
            .ok_or(RetrievalError::AnnIndexMissing {
                chunk_id: slot.chunk_id,
                position: slot.position,
            })?;
        ids.push(id);
    }
    Ok(ids)
}

fn score(query: &[f32], blob: &[u8]) -> WikiliteResult<f64> {
    let stored = bytes_to_f32(blob)?;
    euclidean(query, &stored)
}

/// Exact Euclidean rerank. Blobs are fetched in candidate order; decoding and
/// distance may run on the rayon pool, but selection sees candidates in the
/// same order either way.
fn rerank(
    storage: &dyn ICorpusStorage,
    query: &[f32],
    vector_ids: &[i64],
    limit: usize,
    config: &SearchConfig,
) -> WikiliteResult<Vec<(f64, i64)>> {
    let mut blobs = Vec::with_capacity(vector_ids.len());
    for &id in vector_ids {
        let blob = storage
            .vector_embedding(id)?
            .ok_or(RetrievalError::VectorNotFound { id })?;
        blobs.push(blob);
    }

    let distances: Vec<f64> = if config.parallel_rerank {
        blobs
            .par_iter()
            .map(|blob| score(query, blob))
            .collect::<WikiliteResult<_>>()?
    } else {
        blobs
            .iter()
            .map(|blob| score(query, blob))
            .collect::<WikiliteResult<_>>()?
    };

    let mut selector = BoundedSelector::new(limit, config.selection);
    for (&id, distance) in vector_ids.iter().zip(distances) {
        selector.push(distance, id);
    }
    Ok(selector.into_sorted())
}
