//! Search strategies. Each takes the storage (and provider, for vectors) by
//! reference and returns results for one query.

pub mod ann;
pub mod fuzzy;
pub mod lexical;

#[cfg(test)]
pub(crate) mod testing;
