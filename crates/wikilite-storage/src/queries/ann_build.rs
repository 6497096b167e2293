//! Rebuild the quantized ANN chunk index from the full-precision vectors.
//!
//! Vectors are read in id order, sign-quantized, and packed `capacity` to a
//! chunk. Positions are 0-based within each chunk. The whole rebuild runs in
//! a SAVEPOINT so a failure leaves the previous index intact.

use rusqlite::{params, Connection};
use tracing::info;

use wikilite_core::errors::{CodecError, WikiliteResult};
use wikilite_embeddings::codec::{bytes_to_f32, quantize_binary};

use crate::to_storage_err;

/// Counts from an index rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnBuildStats {
    pub vectors: usize,
    pub chunks: usize,
    /// Bytes per quantized vector (`ceil(D/8)`); 0 when there were no vectors.
    pub vector_size: usize,
}

/// Drop and rebuild `vectors_ann_chunks` and `vectors_ann_index`.
pub fn rebuild_ann_index(conn: &Connection, capacity: usize) -> WikiliteResult<AnnBuildStats> {
    conn.execute_batch("SAVEPOINT ann_rebuild")
        .map_err(|e| to_storage_err(format!("ann rebuild savepoint: {e}")))?;

    match rebuild_inner(conn, capacity.max(1)) {
        Ok(stats) => {
            conn.execute_batch("RELEASE ann_rebuild")
                .map_err(|e| to_storage_err(format!("ann rebuild release: {e}")))?;
            info!(
                vectors = stats.vectors,
                chunks = stats.chunks,
                vector_size = stats.vector_size,
                "rebuilt ANN index"
            );
            Ok(stats)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK TO ann_rebuild");
            let _ = conn.execute_batch("RELEASE ann_rebuild");
            Err(e)
        }
    }
}

struct PendingChunk {
    data: Vec<u8>,
    ids: Vec<i64>,
}

fn rebuild_inner(conn: &Connection, capacity: usize) -> WikiliteResult<AnnBuildStats> {
    conn.execute_batch("DELETE FROM vectors_ann_index; DELETE FROM vectors_ann_chunks;")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut stmt = conn
        .prepare("SELECT id, embedding FROM vectors ORDER BY id")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt.query([]).map_err(|e| to_storage_err(e.to_string()))?;

    let mut stats = AnnBuildStats {
        vectors: 0,
        chunks: 0,
        vector_size: 0,
    };
    let mut pending = PendingChunk {
        data: Vec::new(),
        ids: Vec::with_capacity(capacity),
    };

    while let Some(row) = rows.next().map_err(|e| to_storage_err(e.to_string()))? {
        let id: i64 = row.get(0).map_err(|e| to_storage_err(e.to_string()))?;
        let blob: Vec<u8> = row.get(1).map_err(|e| to_storage_err(e.to_string()))?;
        let quantized = quantize_binary(&bytes_to_f32(&blob)?);

        if stats.vectors == 0 {
            stats.vector_size = quantized.len();
        } else if quantized.len() != stats.vector_size {
            return Err(CodecError::LengthMismatch {
                left: stats.vector_size,
                right: quantized.len(),
            }
            .into());
        }

        pending.data.extend_from_slice(&quantized);
        pending.ids.push(id);
        stats.vectors += 1;

        if pending.ids.len() == capacity {
            flush_chunk(conn, &mut pending)?;
            stats.chunks += 1;
        }
    }
    if !pending.ids.is_empty() {
        flush_chunk(conn, &mut pending)?;
        stats.chunks += 1;
    }
    Ok(stats)
}

fn flush_chunk(conn: &Connection, pending: &mut PendingChunk) -> WikiliteResult<()> {
    conn.execute(
        "INSERT INTO vectors_ann_chunks (chunk) VALUES (?1)",
        params![pending.data],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    let chunk_id = conn.last_insert_rowid();

    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO vectors_ann_index (chunk_id, chunk_position, vectors_id)
             VALUES (?1, ?2, ?3)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    for (position, vector_id) in pending.ids.iter().enumerate() {
        stmt.execute(params![chunk_id, position as i64, vector_id])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }

    pending.data.clear();
    pending.ids.clear();
    Ok(())
}
