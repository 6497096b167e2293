//! Candidate selection shared by the vector and fuzzy searches.

pub mod topk;
