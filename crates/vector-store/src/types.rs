use crate::filter::MetadataFilter;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Default number of results a search returns.
pub const DEFAULT_TOP_K: usize = 4;

/// The persisted unit: one chunk's text, metadata and frequency vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredEntry {
    pub id: String,
    pub text: String,
    pub metadata: HashMap<String, Value>,
    pub vector: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub entry: StoredEntry,
    pub score: f32,
}

/// A ranked-retrieval request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub filter: Option<MetadataFilter>,
    pub similarity_threshold: f32,
    pub top_k: usize,
}

impl SearchRequest {
    /// Request with no filter, threshold 0.0 and the default top-k
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filter: None,
            similarity_threshold: 0.0,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Builder: restrict candidates by metadata
    #[must_use]
    pub fn with_filter(mut self, filter: MetadataFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Builder: minimum acceptable cosine score
    #[must_use]
    pub const fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Builder: maximum number of results
    #[must_use]
    pub const fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}
