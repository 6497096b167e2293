use crate::errors::WikiliteResult;
use crate::models::{AnnChunk, ArticleRef, HashHit, TitleHit, VectorArticle};

/// Read-only view of the corpus consumed by the search pipeline.
///
/// Point lookups return `Ok(None)` for an absent row; every other failure
/// is an error. Implementations must support concurrent readers.
pub trait ICorpusStorage: Send + Sync {
    // --- Lexical ---

    /// BM25-ranked title matches, ascending by score, at most `limit`.
    fn search_titles(&self, query: &str, limit: usize) -> WikiliteResult<Vec<TitleHit>>;

    /// Text of the article's first section via section → content → hash.
    fn first_section_text(&self, article_id: i64) -> WikiliteResult<Option<String>>;

    /// BM25-ranked passage matches, ascending by score, at most `limit`.
    fn search_hashes(&self, query: &str, limit: usize) -> WikiliteResult<Vec<HashHit>>;

    /// Owning article of a hash via content → section → article.
    fn article_for_hash(&self, hash_id: i64) -> WikiliteResult<Option<ArticleRef>>;

    // --- Vocabulary ---

    /// One offset-paginated page of vocabulary terms, in a stable order.
    fn vocabulary_batch(&self, offset: usize, limit: usize) -> WikiliteResult<Vec<String>>;

    // --- ANN ---

    /// Stream every ANN chunk to `visit`. An error from `visit` stops the scan
    /// and is returned unchanged.
    fn for_each_ann_chunk(
        &self,
        visit: &mut dyn FnMut(AnnChunk) -> WikiliteResult<()>,
    ) -> WikiliteResult<()>;

    /// Vector id stored at `position` within chunk `chunk_id`.
    fn ann_vector_id(&self, chunk_id: i64, position: usize) -> WikiliteResult<Option<i64>>;

    /// Full-precision embedding blob of a vector record.
    fn vector_embedding(&self, vector_id: i64) -> WikiliteResult<Option<Vec<u8>>>;

    /// Owning article and passage text of a vector record.
    fn article_for_vector(&self, vector_id: i64) -> WikiliteResult<Option<VectorArticle>>;
}
