use crate::quantizer::DEFAULT_DIMENSION;
use serde::{Deserialize, Serialize};

/// Configuration for a [`VectorStore`](crate::VectorStore).
///
/// All values are fixed at construction; the store never re-reads them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Frequency-vector dimension for every entry in the store
    pub dimension: usize,

    /// Maximum chunk length in characters
    pub max_chunk_size: usize,

    /// Overlap carried across chunk boundaries, in characters
    pub overlap_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            max_chunk_size: 500,
            overlap_size: 50,
        }
    }
}

impl StoreConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.dimension == 0 {
            return Err("dimension must be > 0".to_string());
        }

        if self.max_chunk_size == 0 {
            return Err("max_chunk_size must be > 0".to_string());
        }

        if self.overlap_size >= self.max_chunk_size {
            return Err(format!(
                "overlap_size ({}) must be smaller than max_chunk_size ({})",
                self.overlap_size, self.max_chunk_size
            ));
        }

        Ok(())
    }
}
