//! Fuzzy single-term search: edit distance against every distinct
//! vocabulary term, streamed page by page.

use std::collections::HashSet;

use tracing::debug;

use wikilite_core::config::{SearchConfig, SelectionPolicy};
use wikilite_core::errors::WikiliteResult;
use wikilite_core::models::WordMatch;
use wikilite_core::traits::ICorpusStorage;
use wikilite_embeddings::distance::levenshtein;

use crate::ranking::topk::BoundedSelector;

/// The `limit` vocabulary terms closest to `term` by Levenshtein distance,
/// ascending. Ties keep the order in which the vocabulary emitted them.
pub fn search_word_distance(
    storage: &dyn ICorpusStorage,
    config: &SearchConfig,
    term: &str,
    limit: usize,
) -> WikiliteResult<Vec<WordMatch>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let batch_size = config.vocabulary_batch_size.max(1);
    let mut seen: HashSet<String> = HashSet::new();
    let mut selector = BoundedSelector::new(limit, SelectionPolicy::Exact);
    let mut offset = 0;
    let mut batches = 0usize;

    loop {
        let batch = storage.vocabulary_batch(offset, batch_size)?;
        let fetched = batch.len();
        batches += 1;

        for candidate in batch {
            if seen.contains(&candidate) {
                continue;
            }
            let distance = levenshtein(term, &candidate);
            seen.insert(candidate.clone());
            selector.push(
                distance as f64,
                WordMatch {
                    term: candidate,
                    distance,
                },
            );
        }

        if fetched < batch_size {
            break;
        }
        offset += fetched;
    }

    let matches: Vec<WordMatch> = selector.into_sorted().into_iter().map(|(_, m)| m).collect();
    debug!(
        term,
        limit,
        batches,
        distinct = seen.len(),
        results = matches.len(),
        "word distance search"
    );
    Ok(matches)
}
