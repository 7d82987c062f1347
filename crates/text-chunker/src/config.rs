use serde::{Deserialize, Serialize};

/// Configuration for document chunking behavior
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Maximum chunk length in characters (hard limit for accumulation)
    pub max_chunk_size: usize,

    /// Characters carried over from the boundary-crossing unit into the
    /// next chunk when a hard boundary is crossed
    pub overlap_size: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 500,
            overlap_size: 50,
        }
    }
}

impl ChunkerConfig {
    /// Create a config with explicit sizes
    #[must_use]
    pub const fn new(max_chunk_size: usize, overlap_size: usize) -> Self {
        Self {
            max_chunk_size,
            overlap_size,
        }
    }

    /// Create config for short-form content (smaller chunks, tighter overlap)
    #[must_use]
    pub const fn compact() -> Self {
        Self {
            max_chunk_size: 100,
            overlap_size: 20,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = ChunkerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_chunk_size, 500);
        assert_eq!(config.overlap_size, 50);
    }

    #[test]
    fn test_compact_config_valid() {
        assert!(ChunkerConfig::compact().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        // Invalid: zero chunk size
        let config = ChunkerConfig::new(0, 0);
        assert!(config.validate().is_err());

        // Invalid: overlap not smaller than max
        let config = ChunkerConfig::new(100, 100);
        assert!(config.validate().is_err());

        let config = ChunkerConfig::new(100, 150);
        assert!(config.validate().is_err());

        // Valid configuration
        let config = ChunkerConfig::new(100, 20);
        assert!(config.validate().is_ok());
    }
}
