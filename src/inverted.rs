//! The queryable index: stored `IndexData` plus its derived `PrefixTrie`
//!
//! Both live in one immutable `Snapshot`. Readers take the current snapshot
//! and query it without holding the lock; `index_batch` builds the next
//! snapshot off to the side and publishes it with a single pointer swap, so
//! no reader ever sees data and trie out of step.

use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::index::{build_batch, IndexData, TokenIndexData};
use crate::parallel::build_batch_parallel;
use crate::tokenizer::normalize;
use crate::trie::PrefixTrie;
use parking_lot::{Mutex, RwLock};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, error, info};

/// One prefix search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch {
    pub token: String,
    pub data: TokenIndexData,
}

/// A token with a diagnostic count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

#[derive(Debug, Default)]
struct Snapshot {
    data: IndexData,
    trie: PrefixTrie,
}

impl Snapshot {
    fn from_data(data: IndexData) -> Self {
        let trie = PrefixTrie::from_tokens(data.tokens());
        Self { data, trie }
    }
}

/// Inverted index over whitespace tokens with prefix search
#[derive(Debug)]
pub struct InvertedIndex {
    config: IndexConfig,
    current: RwLock<Arc<Snapshot>>,
    /// Serializes writers so concurrent batches are not lost
    update_lock: Mutex<()>,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl InvertedIndex {
    /// Create a new empty index with default settings
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            config,
            current: RwLock::new(Arc::new(Snapshot::default())),
            update_lock: Mutex::new(()),
        }
    }

    /// Restore from previously built data; the trie is rebuilt from its keys
    pub fn from_data(data: IndexData, config: IndexConfig) -> Self {
        Self {
            config,
            current: RwLock::new(Arc::new(Snapshot::from_data(data))),
            update_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read())
    }

    /// Data stored for `token`, if it was ever indexed
    pub fn lookup_exact(&self, token: &str) -> Option<TokenIndexData> {
        self.snapshot().data.get(&normalize(token)).cloned()
    }

    /// Indexed tokens starting with `prefix`
    ///
    /// Prefixes shorter than `min_prefix_length` characters after
    /// normalization return nothing; one character or less never matches.
    /// Results are ordered by token length, then lexicographically.
    pub fn prefix_search(&self, prefix: &str) -> Result<Vec<PrefixMatch>> {
        let prefix = normalize(prefix);
        if prefix.chars().count() < self.config.effective_min_prefix_length() {
            return Ok(Vec::new());
        }

        let snapshot = self.snapshot();
        let mut tokens = snapshot.trie.words_with_prefix(&prefix);
        tokens.sort_unstable_by(|a, b| compare_by_length_then_text(a, b));

        tokens
            .into_iter()
            .map(|token| match snapshot.data.get(&token) {
                Some(data) => Ok(PrefixMatch {
                    data: data.clone(),
                    token,
                }),
                None => {
                    error!(token = %token, "prefix trie returned a token missing from the index");
                    Err(IndexError::Inconsistent(token))
                }
            })
            .collect()
    }

    /// Tokenize and merge a batch of `(text, identifier)` pairs into the index
    ///
    /// Readers see the index either before or after the whole batch.
    pub fn index_batch<T, I>(&self, pairs: &[(T, I)])
    where
        T: AsRef<str> + Sync,
        I: AsRef<str> + Sync,
    {
        if pairs.is_empty() {
            return;
        }

        let batch = if self.config.parallel && pairs.len() > self.config.chunk_size {
            build_batch_parallel(pairs, self.config.chunk_size)
        } else {
            build_batch(pairs)
        };
        debug!(
            pairs = pairs.len(),
            batch_tokens = batch.token_count(),
            "built batch index"
        );

        let _writer = self.update_lock.lock();
        let base = self.snapshot();
        let merged = base.data.clone().merge(batch);
        let next = Arc::new(Snapshot::from_data(merged));

        info!(
            tokens = next.data.token_count(),
            identifiers = next.data.identifier_count(),
            trie_nodes = next.trie.node_count(),
            "published index snapshot"
        );
        *self.current.write() = next;
    }

    /// Tokens by total occurrences across all identifiers, descending
    ///
    /// Equal counts are ordered by token.
    pub fn tokens_by_total_occurrences(&self) -> Vec<TokenCount> {
        self.ranked(TokenIndexData::occurrence_count)
    }

    /// Tokens by number of distinct identifiers, descending
    ///
    /// Equal counts are ordered by token.
    pub fn tokens_by_unique_identifier_count(&self) -> Vec<TokenCount> {
        self.ranked(TokenIndexData::identifier_count)
    }

    fn ranked(&self, count: impl Fn(&TokenIndexData) -> usize) -> Vec<TokenCount> {
        let snapshot = self.snapshot();
        let mut counts: Vec<TokenCount> = snapshot
            .data
            .iter()
            .map(|(token, data)| TokenCount {
                token: token.to_string(),
                count: count(data),
            })
            .collect();
        counts.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)));
        counts
    }

    /// Get total unique tokens
    pub fn token_count(&self) -> usize {
        self.snapshot().data.token_count()
    }

    /// Distinct identifiers seen so far
    pub fn identifier_count(&self) -> usize {
        self.snapshot().data.identifier_count()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().data.is_empty()
    }

    /// Copy of the stored data, e.g. for persistence
    pub fn snapshot_data(&self) -> IndexData {
        self.snapshot().data.clone()
    }
}

/// Shorter tokens first, ties broken case-insensitively
fn compare_by_length_then_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .count()
        .cmp(&b.chars().count())
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}
