//! In-process full-text index with exact and prefix lookup
//!
//! Text is split on spaces, lowercased, and stored as
//! token -> identifier -> sorted occurrence ranges. A character trie over the
//! indexed tokens answers prefix queries.
//!
//! # Example
//!
//! ```
//! use spanindex::InvertedIndex;
//!
//! let index = InvertedIndex::new();
//! let text = "Hello world how is your app SwiftKey doing?";
//! index.index_batch(&[(text, "review1")]);
//!
//! let data = index.lookup_exact("swiftkey").unwrap();
//! let range = data.ranges("review1").unwrap().as_slice()[0];
//! assert_eq!(range.slice(text), Some("SwiftKey"));
//!
//! let matches = index.prefix_search("sw").unwrap();
//! assert_eq!(matches[0].token, "swiftkey");
//! ```

mod config;
mod error;
mod index;
mod inverted;
mod parallel;
mod persistence;
mod range;
mod tokenizer;
mod trie;

// Re-export public API
pub use config::IndexConfig;
pub use error::{IndexError, Result};
pub use index::{binary_merge, build_batch, micro_indices, reduce_merge, IndexData, TokenIndexData};
pub use inverted::{InvertedIndex, PrefixMatch, TokenCount};
pub use parallel::build_batch_parallel;
pub use persistence::{index_exists, load_index, save_index, FORMAT_VERSION};
pub use range::{RangeList, TokenRange};
pub use tokenizer::{normalize, tokenize, tokenize_query, Token, TokenIterator, MIN_PREFIX_LENGTH};
pub use trie::PrefixTrie;
