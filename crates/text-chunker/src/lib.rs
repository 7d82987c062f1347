//! # Passage Text Chunker
//!
//! Boundary-aware text chunking for retrieval over plain documents.
//!
//! ## Philosophy
//!
//! The chunker produces bounded passages that:
//! - Break at sentence boundaries (CJK and latin terminal punctuation,
//!   blank lines), never mid-sentence when it can be avoided
//! - Preserve context continuity by carrying a short overlap across hard
//!   chunk boundaries
//! - Stay within a strict character budget so downstream fingerprinting
//!   stays cheap and predictable
//!
//! ## Architecture
//!
//! ```text
//! Document
//!     │
//!     ├──> Unit Split (sentence punctuation, blank lines)
//!     │
//!     ├──> Greedy Accumulation (max_chunk_size budget)
//!     │    ├─> Overlap seeding on boundary crossings
//!     │    └─> Force-split of oversized units
//!     │
//!     └──> Chunk Generation
//!          └─> Document[] with chunk_index / total_chunks metadata
//! ```
//!
//! ## Example
//!
//! ```rust
//! use passage_text_chunker::{Chunker, ChunkerConfig, Document};
//!
//! let chunker = Chunker::new(ChunkerConfig::default());
//!
//! let doc = Document::new("guide", "第一章：概述。人工智能是计算机科学的重要分支。");
//! let chunks = chunker.chunk_document(&doc);
//! for chunk in chunks {
//!     println!("{}: {}", chunk.id, chunk.text);
//! }
//! ```

mod chunker;
mod config;
mod error;
mod types;

pub use chunker::{Chunker, ChunkingStats};
pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use types::{
    Document, CHUNK_INDEX_KEY, ORIGINAL_DOCUMENT_ID_KEY, TOTAL_CHUNKS_KEY,
};
