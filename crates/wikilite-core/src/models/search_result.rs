use std::fmt;

use serde::{Deserialize, Serialize};

/// Which search strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultKind {
    #[serde(rename = "T")]
    TitleMatch,
    #[serde(rename = "C")]
    ContentMatch,
    #[serde(rename = "V")]
    VectorMatch,
}

impl ResultKind {
    /// Single-letter tag used on the wire.
    pub fn tag(self) -> &'static str {
        match self {
            Self::TitleMatch => "T",
            Self::ContentMatch => "C",
            Self::VectorMatch => "V",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleMatch => f.write_str("title-match"),
            Self::ContentMatch => f.write_str("content-match"),
            Self::VectorMatch => f.write_str("vector-match"),
        }
    }
}

/// One hit from a lexical or vector search. Lives for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub article_id: i64,
    pub title: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    /// BM25 score or Euclidean distance. Lower is better for every kind.
    pub power: f64,
}

/// One vocabulary term scored by edit distance against the query term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMatch {
    pub term: String,
    pub distance: usize,
}
