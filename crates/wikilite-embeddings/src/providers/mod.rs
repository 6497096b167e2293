//! Embedding providers.

mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
