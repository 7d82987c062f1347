use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::types::{
    Document, CHUNK_INDEX_KEY, ORIGINAL_DOCUMENT_ID_KEY, TOTAL_CHUNKS_KEY,
};
use serde_json::Value;

/// Main chunker interface for splitting documents into bounded passages
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// Create a new chunker with configuration
    #[must_use]
    pub fn new(config: ChunkerConfig) -> Self {
        Self::try_new(config).expect("Invalid chunker configuration provided")
    }

    /// Create a new chunker, surfacing configuration errors to the caller
    pub fn try_new(config: ChunkerConfig) -> Result<Self> {
        config.validate().map_err(ChunkerError::InvalidConfig)?;
        Ok(Self { config })
    }

    /// Split a document into bounded chunks along sentence boundaries.
    ///
    /// A blank document is passed through unchanged as the single element of
    /// the result; it gets no chunk metadata. Every other document yields
    /// chunks with ids `{id}_chunk_{index}` and metadata copied from the
    /// parent plus `chunk_index`, `total_chunks` and `original_document_id`.
    #[must_use]
    pub fn chunk_document(&self, document: &Document) -> Vec<Document> {
        if document.is_blank() {
            return vec![document.clone()];
        }

        let pieces = self.split_text(&document.text);
        let total = pieces.len();
        log::debug!("Split document '{}' into {} chunks", document.id, total);

        pieces
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                let mut metadata = document.metadata.clone();
                metadata.insert(CHUNK_INDEX_KEY.to_string(), Value::from(index as u64));
                metadata.insert(TOTAL_CHUNKS_KEY.to_string(), Value::from(total as u64));
                metadata.insert(
                    ORIGINAL_DOCUMENT_ID_KEY.to_string(),
                    Value::from(document.id.clone()),
                );
                Document {
                    id: format!("{}_chunk_{}", document.id, index),
                    text,
                    metadata,
                }
            })
            .collect()
    }

    /// Chunk several documents in order; no overlap crosses document borders
    #[must_use]
    pub fn chunk_documents(&self, documents: &[Document]) -> Vec<Document> {
        documents
            .iter()
            .flat_map(|document| self.chunk_document(document))
            .collect()
    }

    /// Accumulate sentence-like units into chunks of at most
    /// `max_chunk_size` characters, carrying `overlap_size` trailing
    /// characters of the boundary-crossing unit into the next chunk.
    fn split_text(&self, text: &str) -> Vec<String> {
        let max_size = self.config.max_chunk_size;
        let overlap_size = self.config.overlap_size;

        let mut chunks: Vec<String> = Vec::new();
        let mut buffer = String::new();
        let mut buffer_chars = 0usize;

        for unit in split_units(text) {
            if unit.trim().is_empty() {
                continue;
            }

            let unit_chars = unit.chars().count();
            if buffer_chars + unit_chars <= max_size {
                buffer.push_str(unit);
                buffer_chars += unit_chars;
                continue;
            }

            if !buffer.is_empty() {
                chunks.push(std::mem::take(&mut buffer));
                buffer_chars = 0;
            }

            if unit_chars > max_size {
                // Oversized unit: emit fixed-size slices, the final slice
                // seeds the next buffer.
                let mut slices = force_split(unit, max_size);
                if let Some(last) = slices.pop() {
                    buffer_chars = last.chars().count();
                    buffer = last;
                }
                chunks.extend(slices);
            } else {
                // Overlap carries forward from the unit that crossed the
                // boundary, not from chunk history.
                if unit_chars > overlap_size {
                    let tail = tail_chars(unit, overlap_size);
                    buffer.push_str(tail);
                    buffer_chars += overlap_size;
                }
                buffer.push_str(unit);
                buffer_chars += unit_chars;
            }
        }

        if !buffer.is_empty() {
            chunks.push(buffer);
        }

        chunks
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Get statistics about chunking results
    #[must_use]
    pub fn get_stats(chunks: &[Document]) -> ChunkingStats {
        let char_counts: Vec<usize> = chunks.iter().map(Document::char_count).collect();
        let total_chars: usize = char_counts.iter().sum();
        ChunkingStats {
            total_chunks: chunks.len(),
            total_chars,
            avg_chars_per_chunk: if chunks.is_empty() {
                0
            } else {
                total_chars / chunks.len()
            },
            min_chars: char_counts.iter().copied().min().unwrap_or(0),
            max_chars: char_counts.iter().copied().max().unwrap_or(0),
        }
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(ChunkerConfig::default())
    }
}

/// Split text into sentence-like units. Boundaries fall after
/// sentence-terminal punctuation and after every blank-line pair; the
/// delimiter stays attached to the unit it terminates.
fn split_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0usize;
    let mut prev = '\0';

    for (idx, c) in text.char_indices() {
        let boundary = matches!(c, '。' | '！' | '!' | '？' | '?') || (c == '\n' && prev == '\n');
        if boundary {
            let end = idx + c.len_utf8();
            units.push(&text[start..end]);
            start = end;
        }
        prev = c;
    }

    if start < text.len() {
        units.push(&text[start..]);
    }

    units
}

/// Force-split an oversized unit into consecutive slices of exactly
/// `max_size` characters; the final slice holds the remainder.
fn force_split(text: &str, max_size: usize) -> Vec<String> {
    let mut slices = Vec::new();
    let mut current = String::new();
    let mut count = 0usize;

    for c in text.chars() {
        current.push(c);
        count += 1;
        if count == max_size {
            slices.push(std::mem::take(&mut current));
            count = 0;
        }
    }

    if !current.is_empty() {
        slices.push(current);
    }

    slices
}

/// The trailing `n` characters of `s`
fn tail_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// Statistics about chunking results
#[derive(Debug, Clone)]
pub struct ChunkingStats {
    pub total_chunks: usize,
    pub total_chars: usize,
    pub avg_chars_per_chunk: usize,
    pub min_chars: usize,
    pub max_chars: usize,
}

impl std::fmt::Display for ChunkingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunks: {} | Chars: {} | Avg: {} | Range: {}-{}",
            self.total_chunks,
            self.total_chars,
            self.avg_chars_per_chunk,
            self.min_chars,
            self.max_chars
        )
    }
}
