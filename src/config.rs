use crate::tokenizer::MIN_PREFIX_LENGTH;
use serde::{Deserialize, Serialize};

/// Configuration for an `InvertedIndex`
///
/// None of these settings change query results; `parallel` and `chunk_size`
/// only change how a batch is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Prefix queries shorter than this (in characters, after normalization)
    /// return nothing. Values below `MIN_PREFIX_LENGTH` are raised to it.
    pub min_prefix_length: usize,

    /// Build large batches on the rayon pool
    pub parallel: bool,

    /// Number of pairs per parallel worker chunk
    pub chunk_size: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            min_prefix_length: MIN_PREFIX_LENGTH,
            parallel: true,
            chunk_size: 256,
        }
    }
}

impl IndexConfig {
    /// The prefix length actually enforced; never below `MIN_PREFIX_LENGTH`
    pub fn effective_min_prefix_length(&self) -> usize {
        self.min_prefix_length.max(MIN_PREFIX_LENGTH)
    }

    /// Single-threaded batch building
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}
