//! Schema migrations using PRAGMA user_version.

pub mod v001_corpus_schema;
pub mod v002_fts5_indexes;
pub mod v003_vector_tables;

use rusqlite::Connection;
use tracing::info;

use wikilite_core::constants::SCHEMA_VERSION;
use wikilite_core::errors::{StorageError, WikiliteResult};

use crate::to_storage_err;

type Migration = fn(&Connection) -> WikiliteResult<()>;

const MIGRATIONS: &[(u32, Migration)] = &[
    (1, v001_corpus_schema::migrate),
    (2, v002_fts5_indexes::migrate),
    (3, v003_vector_tables::migrate),
];

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> WikiliteResult<()> {
    let current = current_version(conn)?;

    for &(version, migrate) in MIGRATIONS {
        if current >= version {
            continue;
        }
        migrate(conn).map_err(|e| StorageError::MigrationFailed {
            version,
            reason: e.to_string(),
        })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
        info!(version, "applied migration");
    }

    debug_assert_eq!(MIGRATIONS.last().map(|m| m.0), Some(SCHEMA_VERSION));
    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> WikiliteResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}
