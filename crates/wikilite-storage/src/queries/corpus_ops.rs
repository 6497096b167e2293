//! Ingestion-side writes. Search never calls these; they exist for import
//! tooling and test fixtures.

use rusqlite::{params, Connection};

use wikilite_core::errors::WikiliteResult;
use wikilite_embeddings::codec::f32_to_bytes;

use crate::to_storage_err;

/// Insert an article, returning its id.
pub fn insert_article(conn: &Connection, title: &str) -> WikiliteResult<i64> {
    conn.execute("INSERT INTO articles (title) VALUES (?1)", params![title])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Insert a section of an article, returning its id.
pub fn insert_section(conn: &Connection, article_id: i64, title: &str) -> WikiliteResult<i64> {
    conn.execute(
        "INSERT INTO sections (article_id, title) VALUES (?1, ?2)",
        params![article_id, title],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Content address of a passage.
pub fn content_hash(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

/// Insert a passage, deduplicating by content hash. Returns the id of the
/// existing row when the text is already stored.
pub fn upsert_hash(conn: &Connection, text: &str) -> WikiliteResult<i64> {
    let hash = content_hash(text);
    conn.execute(
        "INSERT INTO hashes (hash, text) VALUES (?1, ?2)
         ON CONFLICT(hash) DO NOTHING",
        params![hash, text],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    conn.query_row(
        "SELECT id FROM hashes WHERE hash = ?1",
        params![hash],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Point a section's content slot at a hash.
pub fn link_content(conn: &Connection, section_id: i64, hash_id: i64) -> WikiliteResult<()> {
    conn.execute(
        "INSERT INTO content (section_id, hash_id) VALUES (?1, ?2)
         ON CONFLICT(section_id) DO UPDATE SET hash_id = excluded.hash_id",
        params![section_id, hash_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Append terms to the vocabulary as given (no deduplication).
pub fn insert_terms<S: AsRef<str>>(conn: &Connection, terms: &[S]) -> WikiliteResult<usize> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO vocabulary (term) VALUES (?1)")
        .map_err(|e| to_storage_err(e.to_string()))?;
    for term in terms {
        stmt.execute(params![term.as_ref()])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(terms.len())
}

/// Replace the vocabulary with the distinct terms of the passage index.
pub fn rebuild_vocabulary(conn: &Connection) -> WikiliteResult<usize> {
    conn.execute_batch(
        "DELETE FROM vocabulary;
         INSERT INTO vocabulary (term) SELECT term FROM hash_vocab ORDER BY term;",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    super::vocabulary::vocabulary_len(conn)
}

/// Store a full-precision embedding for the hash with the same id.
pub fn upsert_vector(conn: &Connection, vector_id: i64, embedding: &[f32]) -> WikiliteResult<()> {
    conn.execute(
        "INSERT INTO vectors (id, embedding) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET embedding = excluded.embedding",
        params![vector_id, f32_to_bytes(embedding)],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
