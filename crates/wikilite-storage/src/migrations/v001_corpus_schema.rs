//! v001: articles, sections, content slots, deduplicated hash texts, vocabulary.

use rusqlite::Connection;

use wikilite_core::errors::WikiliteResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> WikiliteResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS articles (
            id     INTEGER PRIMARY KEY,
            title  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sections (
            id          INTEGER PRIMARY KEY,
            article_id  INTEGER NOT NULL,
            title       TEXT NOT NULL DEFAULT '',
            FOREIGN KEY (article_id) REFERENCES articles(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_sections_article ON sections(article_id);

        -- One row per distinct passage; `hash` is the content address.
        CREATE TABLE IF NOT EXISTS hashes (
            id    INTEGER PRIMARY KEY,
            hash  TEXT NOT NULL UNIQUE,
            text  TEXT NOT NULL
        );

        -- At most one content slot per section.
        CREATE TABLE IF NOT EXISTS content (
            section_id  INTEGER NOT NULL UNIQUE,
            hash_id     INTEGER NOT NULL,
            FOREIGN KEY (section_id) REFERENCES sections(id) ON DELETE CASCADE,
            FOREIGN KEY (hash_id) REFERENCES hashes(id)
        );

        CREATE INDEX IF NOT EXISTS idx_content_hash ON content(hash_id);

        -- Not unique: rebuilt vocabularies may repeat terms across sources.
        CREATE TABLE IF NOT EXISTS vocabulary (
            term  TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
