//! v002: FTS5 indexes over article titles and passage text, with sync
//! triggers, plus a row-level fts5vocab view used to rebuild the vocabulary.

use rusqlite::Connection;

use wikilite_core::errors::WikiliteResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> WikiliteResult<()> {
    conn.execute_batch(
        "
        CREATE VIRTUAL TABLE IF NOT EXISTS article_search USING fts5(
            title,
            content='articles',
            content_rowid='id'
        );

        CREATE TRIGGER IF NOT EXISTS article_search_insert AFTER INSERT ON articles BEGIN
            INSERT INTO article_search(rowid, title) VALUES (new.id, new.title);
        END;

        CREATE TRIGGER IF NOT EXISTS article_search_delete BEFORE DELETE ON articles BEGIN
            INSERT INTO article_search(article_search, rowid, title)
            VALUES ('delete', old.id, old.title);
        END;

        CREATE TRIGGER IF NOT EXISTS article_search_update AFTER UPDATE ON articles BEGIN
            INSERT INTO article_search(article_search, rowid, title)
            VALUES ('delete', old.id, old.title);
            INSERT INTO article_search(rowid, title) VALUES (new.id, new.title);
        END;

        CREATE VIRTUAL TABLE IF NOT EXISTS hash_search USING fts5(
            text,
            content='hashes',
            content_rowid='id'
        );

        CREATE TRIGGER IF NOT EXISTS hash_search_insert AFTER INSERT ON hashes BEGIN
            INSERT INTO hash_search(rowid, text) VALUES (new.id, new.text);
        END;

        CREATE TRIGGER IF NOT EXISTS hash_search_delete BEFORE DELETE ON hashes BEGIN
            INSERT INTO hash_search(hash_search, rowid, text)
            VALUES ('delete', old.id, old.text);
        END;

        CREATE VIRTUAL TABLE IF NOT EXISTS hash_vocab USING fts5vocab(hash_search, 'row');
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
