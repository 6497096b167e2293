//! v003: full-precision vectors and the quantized ANN chunk index.
//!
//! A vector's id is the id of the hash row it embeds. Chunks hold
//! concatenated `ceil(D/8)`-byte quantized vectors; `vectors_ann_index`
//! maps (chunk, position) back to the vector id.

use rusqlite::Connection;

use wikilite_core::errors::WikiliteResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> WikiliteResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS vectors (
            id         INTEGER PRIMARY KEY,
            embedding  BLOB NOT NULL
        );

        CREATE TABLE IF NOT EXISTS vectors_ann_chunks (
            id     INTEGER PRIMARY KEY,
            chunk  BLOB NOT NULL
        );

        CREATE TABLE IF NOT EXISTS vectors_ann_index (
            chunk_id        INTEGER NOT NULL,
            chunk_position  INTEGER NOT NULL,
            vectors_id      INTEGER NOT NULL,
            PRIMARY KEY (chunk_id, chunk_position)
        ) WITHOUT ROWID;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
