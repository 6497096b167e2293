//! Row shapes returned by the storage layer.

/// A hit from the title full-text index.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleHit {
    pub article_id: i64,
    pub title: String,
    /// Raw `bm25()` value (more negative = more relevant).
    pub power: f64,
}

/// A hit from the content (hash text) full-text index.
#[derive(Debug, Clone, PartialEq)]
pub struct HashHit {
    pub hash_id: i64,
    pub text: String,
    pub power: f64,
}

/// Article identity and title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRef {
    pub id: i64,
    pub title: String,
}

/// Owning article and passage text for a vector record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorArticle {
    pub article: ArticleRef,
    /// `None` when the vector's hash row is gone.
    pub text: Option<String>,
}

/// One row of `vectors_ann_chunks`: concatenated quantized vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnChunk {
    pub id: i64,
    pub data: Vec<u8>,
}
