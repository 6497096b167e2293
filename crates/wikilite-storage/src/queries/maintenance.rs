//! Index optimization and corpus counts.

use rusqlite::Connection;

use wikilite_core::errors::WikiliteResult;

use crate::to_storage_err;

/// Row counts across the corpus tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub articles: usize,
    pub sections: usize,
    pub hashes: usize,
    pub terms: usize,
    pub vectors: usize,
    pub ann_chunks: usize,
}

/// Merge FTS5 segments, then VACUUM. Must run outside a transaction.
pub fn optimize(conn: &Connection) -> WikiliteResult<()> {
    conn.execute_batch(
        "
        INSERT INTO article_search(article_search) VALUES ('optimize');
        INSERT INTO hash_search(hash_search) VALUES ('optimize');
        VACUUM;
        ",
    )
    .map_err(|e| to_storage_err(format!("optimize: {e}")))?;
    Ok(())
}

/// Count rows in every corpus table.
pub fn corpus_stats(conn: &Connection) -> WikiliteResult<CorpusStats> {
    let count = |table: &str| -> WikiliteResult<usize> {
        let n: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(n as usize)
    };
    Ok(CorpusStats {
        articles: count("articles")?,
        sections: count("sections")?,
        hashes: count("hashes")?,
        terms: count("vocabulary")?,
        vectors: count("vectors")?,
        ann_chunks: count("vectors_ann_chunks")?,
    })
}
