//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, configurable mmap/cache/busy_timeout,
//! foreign_keys ON. Readers additionally run with query_only.

use rusqlite::Connection;

use wikilite_core::config::StorageConfig;
use wikilite_core::errors::WikiliteResult;

use crate::to_storage_err;

/// Apply all performance and safety pragmas to the write connection.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> WikiliteResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA mmap_size = {mmap};
        PRAGMA cache_size = {cache};
        PRAGMA busy_timeout = {busy};
        PRAGMA foreign_keys = ON;
        PRAGMA temp_store = MEMORY;
        ",
        mmap = config.mmap_size,
        cache = config.cache_size,
        busy = config.busy_timeout_ms,
    ))
    .map_err(|e| to_storage_err(format!("failed to apply pragmas: {e}")))?;
    Ok(())
}

/// Apply read-only pragmas to a read connection.
pub fn apply_read_pragmas(conn: &Connection, config: &StorageConfig) -> WikiliteResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA query_only = ON;
        PRAGMA mmap_size = {mmap};
        PRAGMA cache_size = {cache};
        PRAGMA busy_timeout = {busy};
        PRAGMA temp_store = MEMORY;
        ",
        mmap = config.mmap_size,
        cache = config.cache_size,
        busy = config.busy_timeout_ms,
    ))
    .map_err(|e| to_storage_err(format!("failed to apply read pragmas: {e}")))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> WikiliteResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
