//! FTS5 BM25 queries over titles and passage text, and the companion-field
//! lookups that follow each hit.

use rusqlite::{params, Connection, OptionalExtension};

use wikilite_core::errors::WikiliteResult;
use wikilite_core::models::{ArticleRef, HashHit, TitleHit};

use super::sql_limit;
use crate::to_storage_err;

/// Title matches ranked by `bm25()` ascending (lower = more relevant).
pub fn search_titles(conn: &Connection, query: &str, limit: usize) -> WikiliteResult<Vec<TitleHit>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT rowid, title, bm25(article_search) AS power
             FROM article_search
             WHERE article_search MATCH ?1
             ORDER BY power ASC
             LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![query, sql_limit(limit)], |row| {
            Ok(TitleHit {
                article_id: row.get(0)?,
                title: row.get(1)?,
                power: row.get(2)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(results)
}

/// Passage matches ranked by `bm25()` ascending.
pub fn search_hashes(conn: &Connection, query: &str, limit: usize) -> WikiliteResult<Vec<HashHit>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT rowid, text, bm25(hash_search) AS power
             FROM hash_search
             WHERE hash_search MATCH ?1
             ORDER BY power ASC
             LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![query, sql_limit(limit)], |row| {
            Ok(HashHit {
                hash_id: row.get(0)?,
                text: row.get(1)?,
                power: row.get(2)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(results)
}

/// Text of the article's first section. `None` if the article has no
/// sections, or its first section has no content slot.
pub fn first_section_text(conn: &Connection, article_id: i64) -> WikiliteResult<Option<String>> {
    conn.query_row(
        "SELECT text
         FROM hashes
         WHERE id = (
             SELECT hash_id
             FROM content
             WHERE section_id = (
                 SELECT id FROM sections WHERE article_id = ?1 ORDER BY id LIMIT 1
             )
         )",
        params![article_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Article owning the first section that references `hash_id`.
pub fn article_for_hash(conn: &Connection, hash_id: i64) -> WikiliteResult<Option<ArticleRef>> {
    conn.query_row(
        "SELECT id, title
         FROM articles
         WHERE id = (
             SELECT article_id
             FROM sections
             WHERE id = (
                 SELECT section_id FROM content WHERE hash_id = ?1 ORDER BY section_id LIMIT 1
             )
         )",
        params![hash_id],
        |row| {
            Ok(ArticleRef {
                id: row.get(0)?,
                title: row.get(1)?,
            })
        },
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}
