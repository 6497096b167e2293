//! Offset-paginated vocabulary scan.

use rusqlite::{params, Connection};

use wikilite_core::errors::WikiliteResult;

use super::sql_limit;
use crate::to_storage_err;

/// One page of terms in insertion order.
pub fn vocabulary_batch(conn: &Connection, offset: usize, limit: usize) -> WikiliteResult<Vec<String>> {
    let mut stmt = conn
        .prepare_cached("SELECT term FROM vocabulary ORDER BY rowid LIMIT ?1 OFFSET ?2")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![sql_limit(limit), sql_limit(offset)], |row| {
            row.get::<_, String>(0)
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(results)
}

/// Total number of vocabulary rows, duplicates included.
pub fn vocabulary_len(conn: &Connection) -> WikiliteResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM vocabulary", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}
