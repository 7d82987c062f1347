use crate::config::StoreConfig;
use crate::error::{Result, VectorStoreError};
use crate::fingerprint;
use crate::quantizer::Quantizer;
use crate::types::{SearchRequest, SearchResult, StoredEntry};
use passage_text_chunker::{Chunker, ChunkerConfig, Document};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{PoisonError, RwLock};

/// Concurrent in-memory store of chunked, quantized passages.
///
/// Owns every [`StoredEntry`] and ingested fingerprint for its lifetime. All
/// operations take `&self`; the entry map and fingerprint set are the only
/// mutable state and are guarded independently, so parallel `add`, `delete`
/// and `search` calls are safe.
pub struct VectorStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
    fingerprints: RwLock<HashSet<String>>,
    chunker: Chunker,
    quantizer: Quantizer,
    dimension: usize,
}

impl VectorStore {
    /// Create an empty store. Invalid configuration is fatal here.
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate().map_err(VectorStoreError::InvalidConfig)?;

        let chunker = Chunker::new(ChunkerConfig::new(
            config.max_chunk_size,
            config.overlap_size,
        ));
        let quantizer = Quantizer::new(config.dimension)?;

        log::info!("Initializing VectorStore (dimension {})", config.dimension);

        Ok(Self {
            entries: RwLock::new(HashMap::new()),
            fingerprints: RwLock::new(HashSet::new()),
            chunker,
            quantizer,
            dimension: config.dimension,
        })
    }

    /// Ingest documents: dedup, chunk, quantize, upsert.
    ///
    /// Documents whose `fingerprint` metadata was already ingested are
    /// filtered out before chunking; documents without a fingerprint bypass
    /// deduplication. Chunks that quantize to the empty sentinel (blank
    /// text) are skipped, since they could never match a query.
    pub fn add(&self, documents: Vec<Document>) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }

        // Document-level dedup: a duplicate whole document never reaches
        // the chunker.
        let fresh: Vec<Document> = {
            let seen = self
                .fingerprints
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            documents
                .into_iter()
                .filter(|doc| {
                    fingerprint::fingerprint_of(doc).map_or(true, |fp| !seen.contains(fp))
                })
                .collect()
        };

        if fresh.is_empty() {
            log::debug!("All documents already ingested, nothing to add");
            return Ok(());
        }

        log::info!("Adding {} documents to store", fresh.len());

        let chunks = self.chunker.chunk_documents(&fresh);

        // Quantize outside the write lock; inserts are brief.
        let mut prepared = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let vector = self.quantizer.quantize_document(&chunk);
            if vector.is_empty() {
                log::debug!("Skipping chunk '{}': no content to quantize", chunk.id);
                continue;
            }
            if vector.iter().all(|v| *v == 0.0) {
                log::debug!("Chunk '{}' has no rankable terms", chunk.id);
            }
            prepared.push(StoredEntry {
                id: chunk.id,
                text: chunk.text,
                metadata: chunk.metadata,
                vector,
            });
        }

        {
            let mut entries = self
                .entries
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            for entry in prepared {
                entries.insert(entry.id.clone(), entry);
            }
        }

        let mut seen = self
            .fingerprints
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for doc in &fresh {
            if let Some(fp) = fingerprint::fingerprint_of(doc) {
                seen.insert(fp.to_string());
            }
        }

        Ok(())
    }

    /// Remove entries by id; missing ids are not an error.
    ///
    /// Fingerprints are NOT reclaimed: deleting entries and then re-adding a
    /// document with the same fingerprint silently skips the add. Callers
    /// that need re-ingestion after delete must vary the fingerprint (for
    /// example via a salted fingerprint).
    pub fn delete(&self, ids: &[String]) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for id in ids {
            entries.remove(id);
        }
    }

    /// Ranked similarity search over the current entries.
    ///
    /// A malformed filter fails this call only. An empty or blank query
    /// quantizes to the empty sentinel and yields no results.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        if let Some(filter) = &request.filter {
            filter.validate()?;
        }

        log::debug!(
            "Searching for '{}' (threshold {}, top_k {})",
            request.query,
            request.similarity_threshold,
            request.top_k
        );

        let query_vector = self.quantizer.quantize(&request.query);
        if query_vector.is_empty() {
            return Ok(Vec::new());
        }

        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let mut results: Vec<SearchResult> = entries
            .values()
            .filter(|entry| {
                request
                    .filter
                    .as_ref()
                    .map_or(true, |f| f.matches(&entry.metadata))
            })
            .map(|entry| SearchResult {
                score: Quantizer::cosine_similarity(&query_vector, &entry.vector),
                entry: entry.clone(),
            })
            .filter(|result| result.score >= request.similarity_threshold)
            .collect();

        // Score descending; ties break on id so results are reproducible.
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.entry.id.cmp(&b.entry.id))
        });
        results.truncate(request.top_k);

        log::debug!("Found {} results", results.len());
        Ok(results)
    }

    /// Get an entry by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<StoredEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Check whether an entry id is present
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Get total number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and every recorded fingerprint.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.fingerprints
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Configured vector dimension
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Save the whole entry map as a JSON object `{id -> entry}`.
    /// Creates the file if absent, overwrites it otherwise.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        log::info!("Saving VectorStore to {:?}", path);

        let json = {
            let entries = self
                .entries
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            serde_json::to_string_pretty(&*entries)?
        };
        tokio::fs::write(path, json).await?;

        log::info!("VectorStore saved successfully");
        Ok(())
    }

    /// Replace the in-memory entry map with the file's contents.
    ///
    /// The load is wholesale, not merged. Malformed JSON and entries whose
    /// vector does not match the configured dimension are fatal for this
    /// operation and leave the store unchanged. Fingerprints are not
    /// restored from disk.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        log::info!("Loading VectorStore from {:?}", path);

        let data = tokio::fs::read_to_string(path).await?;
        let parsed: HashMap<String, StoredEntry> = serde_json::from_str(&data)?;

        for entry in parsed.values() {
            if entry.vector.len() != self.dimension {
                return Err(VectorStoreError::InvalidDimension {
                    expected: self.dimension,
                    actual: entry.vector.len(),
                });
            }
        }

        let count = parsed.len();
        *self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner) = parsed;

        log::info!("Loaded {} entries", count);
        Ok(())
    }
}
