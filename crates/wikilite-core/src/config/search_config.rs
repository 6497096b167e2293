use serde::{Deserialize, Serialize};

use super::defaults;

/// How bounded candidate lists admit a new entry once full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// True top-k: the worst retained entry is evicted.
    #[default]
    Exact,
    /// Linear scan replacing the first retained entry with a larger distance.
    /// Approximate; kept for result parity with existing deployments.
    ReplaceFirstWorse,
}

/// Search configuration, threaded explicitly into every search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Prepended to the query before embedding (e.g. `"query: "` for E5 models).
    pub query_prefix: String,
    /// Coarse-stage candidates kept per requested result.
    pub ann_overfetch: usize,
    /// Vocabulary rows fetched per page in fuzzy search.
    pub vocabulary_batch_size: usize,
    /// Admission policy for the ANN candidate lists.
    pub selection: SelectionPolicy,
    /// Result count used by callers that do not pass one.
    pub default_limit: usize,
    /// Decode and score fine-stage vectors on the rayon pool.
    pub parallel_rerank: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query_prefix: defaults::DEFAULT_QUERY_PREFIX.to_string(),
            ann_overfetch: defaults::DEFAULT_ANN_OVERFETCH,
            vocabulary_batch_size: defaults::DEFAULT_VOCABULARY_BATCH_SIZE,
            selection: SelectionPolicy::default(),
            default_limit: defaults::DEFAULT_SEARCH_LIMIT,
            parallel_rerank: defaults::DEFAULT_PARALLEL_RERANK,
        }
    }
}
