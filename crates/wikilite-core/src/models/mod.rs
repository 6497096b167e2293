mod corpus;
mod search_result;

pub use corpus::{AnnChunk, ArticleRef, HashHit, TitleHit, VectorArticle};
pub use search_result::{ResultKind, SearchResult, WordMatch};
