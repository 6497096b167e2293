//! # wikilite-core
//!
//! Foundation crate for the wikilite retrieval engine.
//! Defines the result models, storage and embedding traits, errors,
//! config, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod observability;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::WikiliteConfig;
pub use errors::{WikiliteError, WikiliteResult};
pub use models::{ResultKind, SearchResult, WordMatch};
