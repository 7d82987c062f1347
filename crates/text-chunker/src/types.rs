use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Metadata key carrying the 0-based index of a chunk within its parent.
pub const CHUNK_INDEX_KEY: &str = "chunk_index";

/// Metadata key carrying the total number of chunks the parent produced.
pub const TOTAL_CHUNKS_KEY: &str = "total_chunks";

/// Metadata key carrying the id of the document a chunk was derived from.
pub const ORIGINAL_DOCUMENT_ID_KEY: &str = "original_document_id";

/// A text document with free-form metadata.
///
/// Chunks are documents too: the chunker emits `Document` values whose id is
/// `{parent}_chunk_{index}` and whose metadata is a copy of the parent's,
/// extended with the chunk keys above. Metadata is copied, never shared, so a
/// chunk does not keep its parent alive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Caller-supplied identifier
    pub id: String,

    /// The document text (UTF-8)
    pub text: String,

    /// Arbitrary scalar/string metadata, order-irrelevant
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl Document {
    /// Create a new document with empty metadata
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    /// Builder: attach a metadata entry
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Look up a metadata value as a string slice
    #[must_use]
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// Whether the text is empty or whitespace-only
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Text length in Unicode scalar values
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
