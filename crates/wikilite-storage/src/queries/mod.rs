//! SQL for every storage operation, grouped by concern. Each function takes
//! a borrowed connection so the engine decides which pool serves it.

pub mod ann_build;
pub mod ann_search;
pub mod corpus_ops;
pub mod lexical_search;
pub mod maintenance;
pub mod vocabulary;

/// SQLite binds integers as i64; counts past `i64::MAX` saturate.
pub(crate) fn sql_limit(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
