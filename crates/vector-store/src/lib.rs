//! # Passage Vector Store
//!
//! In-memory vector storage and similarity search over quantized text
//! passages, with deduplication and JSON persistence.
//!
//! ## Features
//!
//! - **Model-free quantization**: a deterministic term-frequency
//!   fingerprint stands in for a trained embedding
//! - **Document-level dedup** via content fingerprints
//! - **Metadata filtering** with typed must/must-not conditions
//! - **Persistent storage** with JSON serialization
//! - **Concurrent access**: parallel adds, deletes and searches are safe
//!
//! ## Architecture
//!
//! ```text
//! Document[]
//!     │
//!     ├──> Fingerprint Dedup (skip already-ingested content)
//!     │
//!     ├──> Chunker (passage-text-chunker)
//!     │      └─> bounded, overlapping passages
//!     │
//!     ├──> Quantizer
//!     │      └─> Vector[128] term-frequency fingerprint
//!     │
//!     └──> Entry Map + Fingerprint Set
//!            └─> cosine ranking / JSON persistence
//! ```
//!
//! The quantizer is intentionally lexical: similarity is cosine over raw
//! term counts, so paraphrases do not match. This keeps the engine fast and
//! dependency-light; callers that need semantic recall should front it with
//! a real embedding model.
//!
//! ## Example
//!
//! ```no_run
//! use passage_vector_store::{
//!     fingerprint, SearchRequest, StoreConfig, VectorStore,
//! };
//! use passage_text_chunker::Document;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = VectorStore::new(StoreConfig::default())?;
//!
//!     let doc = fingerprint::with_fingerprint(Document::new(
//!         "intro",
//!         "人工智能是计算机科学的一个重要分支。",
//!     ));
//!     store.add(vec![doc])?;
//!
//!     let results = store.search(
//!         &SearchRequest::new("人工智能").with_top_k(3),
//!     )?;
//!     for result in results {
//!         println!("{}: {:.3}", result.entry.id, result.score);
//!     }
//!
//!     store.save("store.json").await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
pub mod filter;
pub mod fingerprint;
mod quantizer;
mod store;
mod types;

pub use config::StoreConfig;
pub use error::{Result, VectorStoreError};
pub use filter::{FilterCondition, FilterOperator, MetadataFilter};
pub use quantizer::{Quantizer, DEFAULT_DIMENSION};
pub use store::VectorStore;
pub use types::{SearchRequest, SearchResult, StoredEntry, DEFAULT_TOP_K};

// Re-export chunker types for convenience
pub use passage_text_chunker::{Chunker, ChunkerConfig, Document};
