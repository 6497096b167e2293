//! BM25 lexical search over article titles and passage text.
//!
//! Scores are SQLite's raw `bm25()` values, passed through unmodified. Each
//! hit gets one companion lookup; an absent companion row leaves the field
//! empty, any other failure aborts the search.

use tracing::debug;

use wikilite_core::errors::WikiliteResult;
use wikilite_core::models::{ResultKind, SearchResult};
use wikilite_core::traits::ICorpusStorage;

/// FTS5 rejects an empty MATCH expression, so such queries short-circuit.
fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Title matches, each carrying the text of the article's first section.
pub fn search_title(
    storage: &dyn ICorpusStorage,
    query: &str,
    limit: usize,
) -> WikiliteResult<Vec<SearchResult>> {
    if limit == 0 || is_blank(query) {
        return Ok(Vec::new());
    }

    let hits = storage.search_titles(query, limit)?;
    let mut results = Vec::with_capacity(hits.len());
    for hit in hits {
        let text = storage
            .first_section_text(hit.article_id)?
            .unwrap_or_default();
        results.push(SearchResult {
            article_id: hit.article_id,
            title: hit.title,
            text,
            kind: ResultKind::TitleMatch,
            power: hit.power,
        });
    }

    debug!(query, limit, results = results.len(), "title search");
    Ok(results)
}

/// Passage matches, each carrying its owning article's id and title.
/// A passage with no owner reports article id 0 and an empty title.
pub fn search_content(
    storage: &dyn ICorpusStorage,
    query: &str,
    limit: usize,
) -> WikiliteResult<Vec<SearchResult>> {
    if limit == 0 || is_blank(query) {
        return Ok(Vec::new());
    }

    let hits = storage.search_hashes(query, limit)?;
    let mut results = Vec::with_capacity(hits.len());
    for hit in hits {
        let (article_id, title) = match storage.article_for_hash(hit.hash_id)? {
            Some(article) => (article.id, article.title),
            None => (0, String::new()),
        };
        results.push(SearchResult {
            article_id,
            title,
            text: hit.text,
            kind: ResultKind::ContentMatch,
            power: hit.power,
        });
    }

    debug!(query, limit, results = results.len(), "content search");
    Ok(results)
}
