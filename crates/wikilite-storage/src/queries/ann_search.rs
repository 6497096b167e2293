//! Reads behind the two-stage ANN search: chunk scan, (chunk, position)
//! resolution, full-vector fetch, and the join back to article text.

use rusqlite::{params, Connection, OptionalExtension};

use wikilite_core::errors::WikiliteResult;
use wikilite_core::models::{AnnChunk, ArticleRef, VectorArticle};

use crate::to_storage_err;

/// Stream every chunk in id order. Rows are decoded one at a time so memory
/// stays bounded by a single chunk.
pub fn for_each_chunk(
    conn: &Connection,
    visit: &mut dyn FnMut(AnnChunk) -> WikiliteResult<()>,
) -> WikiliteResult<()> {
    let mut stmt = conn
        .prepare("SELECT id, chunk FROM vectors_ann_chunks ORDER BY id")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt.query([]).map_err(|e| to_storage_err(e.to_string()))?;

    while let Some(row) = rows.next().map_err(|e| to_storage_err(e.to_string()))? {
        let chunk = AnnChunk {
            id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
            data: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        };
        visit(chunk)?;
    }
    Ok(())
}

/// Vector id stored at `position` of chunk `chunk_id`.
pub fn vector_id_at(conn: &Connection, chunk_id: i64, position: usize) -> WikiliteResult<Option<i64>> {
    conn.prepare_cached(
        "SELECT vectors_id FROM vectors_ann_index
         WHERE chunk_id = ?1 AND chunk_position = ?2
         LIMIT 1",
    )
    .and_then(|mut stmt| {
        stmt.query_row(params![chunk_id, position as i64], |row| row.get(0))
            .optional()
    })
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Raw little-endian f32 blob of a vector.
pub fn embedding_blob(conn: &Connection, vector_id: i64) -> WikiliteResult<Option<Vec<u8>>> {
    conn.prepare_cached("SELECT embedding FROM vectors WHERE id = ?1")
        .and_then(|mut stmt| stmt.query_row(params![vector_id], |row| row.get(0)).optional())
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Owning article (via content → section → article) and the passage text of
/// the hash the vector embeds.
pub fn article_for_vector(conn: &Connection, vector_id: i64) -> WikiliteResult<Option<VectorArticle>> {
    conn.query_row(
        "SELECT a.id, a.title, (SELECT text FROM hashes WHERE id = ?1) AS text
         FROM articles a
         WHERE a.id = (
             SELECT article_id
             FROM sections
             WHERE id = (
                 SELECT section_id FROM content WHERE hash_id = ?1 ORDER BY section_id LIMIT 1
             )
         )",
        params![vector_id],
        |row| {
            Ok(VectorArticle {
                article: ArticleRef {
                    id: row.get(0)?,
                    title: row.get(1)?,
                },
                text: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Number of ANN chunks.
pub fn chunk_count(conn: &Connection) -> WikiliteResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM vectors_ann_chunks", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}
