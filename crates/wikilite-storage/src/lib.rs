//! # wikilite-storage
//!
//! SQLite persistence for the encyclopedic corpus. Owns the schema
//! (articles, sections, content slots, deduplicated hash texts, vocabulary,
//! full-precision vectors, quantized ANN chunks), the FTS5 indexes over titles
//! and passage text, and every read query the search pipeline issues.
//!
//! Writes exist only for ingestion tooling and fixtures; search never writes.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use wikilite_core::errors::{StorageError, WikiliteError};

/// Wrap a SQLite failure message in the storage error variant.
pub(crate) fn to_storage_err(message: String) -> WikiliteError {
    StorageError::SqliteError { message }.into()
}
