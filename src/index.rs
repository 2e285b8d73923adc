use crate::range::{RangeList, TokenRange};
use crate::tokenizer::tokenize;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

// ============================================================================
// TokenIndexData - identifier -> ranges for one token
// ============================================================================

/// Occurrences of one token, keyed by document identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenIndexData {
    pub(crate) identifiers: FxHashMap<String, RangeList>,
}

impl TokenIndexData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(identifier: &str, range: TokenRange) -> Self {
        let mut identifiers = FxHashMap::default();
        identifiers.insert(identifier.to_string(), RangeList::single(range));
        Self { identifiers }
    }

    /// Identifier-wise union; colliding identifiers merge their range lists
    pub fn merge(self, other: TokenIndexData) -> TokenIndexData {
        // Fold the smaller map into the larger one
        let (mut into, from) = if self.identifiers.len() >= other.identifiers.len() {
            (self, other)
        } else {
            (other, self)
        };

        for (identifier, ranges) in from.identifiers {
            match into.identifiers.remove(&identifier) {
                Some(existing) => {
                    into.identifiers.insert(identifier, existing.merge(ranges));
                }
                None => {
                    into.identifiers.insert(identifier, ranges);
                }
            }
        }

        into
    }

    /// Ranges recorded for an identifier
    pub fn ranges(&self, identifier: &str) -> Option<&RangeList> {
        self.identifiers.get(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RangeList)> + '_ {
        self.identifiers.iter().map(|(id, ranges)| (id.as_str(), ranges))
    }

    /// Identifiers in ascending order
    pub fn sorted_identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.identifiers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of distinct identifiers mentioning the token
    pub fn identifier_count(&self) -> usize {
        self.identifiers.len()
    }

    /// Total occurrences across every identifier
    pub fn occurrence_count(&self) -> usize {
        self.identifiers.values().map(RangeList::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

// ============================================================================
// IndexData - token -> identifier -> ranges, the merge unit
// ============================================================================

/// Token -> identifier -> ranges
///
/// Grown only by merging: a batch is built as a whole new `IndexData` and
/// then merged into the existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexData {
    pub(crate) token_map: FxHashMap<String, TokenIndexData>,
}

impl IndexData {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Index holding a single occurrence; `token` must already be normalized
    pub fn single(token: String, identifier: &str, range: TokenRange) -> Self {
        let mut token_map = FxHashMap::default();
        token_map.insert(token, TokenIndexData::single(identifier, range));
        Self { token_map }
    }

    /// Key-wise union; colliding tokens merge their per-identifier data
    pub fn merge(self, other: IndexData) -> IndexData {
        let (mut into, from) = if self.token_map.len() >= other.token_map.len() {
            (self, other)
        } else {
            (other, self)
        };

        for (token, data) in from.token_map {
            match into.token_map.remove(&token) {
                Some(existing) => {
                    into.token_map.insert(token, existing.merge(data));
                }
                None => {
                    into.token_map.insert(token, data);
                }
            }
        }

        into
    }

    /// Get data for an already-normalized token
    pub fn get(&self, token: &str) -> Option<&TokenIndexData> {
        self.token_map.get(token)
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.token_map.contains_key(token)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.token_map.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenIndexData)> + '_ {
        self.token_map.iter().map(|(token, data)| (token.as_str(), data))
    }

    /// Get total unique tokens
    pub fn token_count(&self) -> usize {
        self.token_map.len()
    }

    /// Distinct identifiers across all tokens
    pub fn identifier_count(&self) -> usize {
        self.token_map
            .values()
            .flat_map(|data| data.identifiers.keys())
            .collect::<FxHashSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_map.is_empty()
    }
}

// ============================================================================
// Merge strategies
// ============================================================================

/// Fold `merge` left to right over `indices`, starting from empty
///
/// The accumulator only grows, so later merges cost more. Kept as the
/// reference result for `binary_merge`.
pub fn reduce_merge(indices: Vec<IndexData>) -> IndexData {
    indices.into_iter().fold(IndexData::new(), IndexData::merge)
}

/// Tournament merge: pair up neighbours and merge each pair until one remains
///
/// Produces exactly what `reduce_merge` does for the same input.
pub fn binary_merge(mut indices: Vec<IndexData>) -> IndexData {
    match indices.len() {
        0 => IndexData::new(),
        1 => indices.pop().unwrap_or_default(),
        2 => {
            let right = indices.pop().unwrap_or_default();
            let left = indices.pop().unwrap_or_default();
            left.merge(right)
        }
        n => {
            let mut paired = Vec::with_capacity(n.div_ceil(2));
            let mut iter = indices.into_iter();
            while let Some(left) = iter.next() {
                paired.push(match iter.next() {
                    Some(right) => left.merge(right),
                    None => left,
                });
            }
            binary_merge(paired)
        }
    }
}

/// One single-occurrence index per token in `text`
pub fn micro_indices(text: &str, identifier: &str) -> Vec<IndexData> {
    tokenize(text)
        .map(|token| IndexData::single(token.text, identifier, token.range))
        .collect()
}

/// Tokenize every `(text, identifier)` pair and binary-merge the occurrences
pub fn build_batch<T, I>(pairs: &[(T, I)]) -> IndexData
where
    T: AsRef<str>,
    I: AsRef<str>,
{
    let micro: Vec<IndexData> = pairs
        .iter()
        .flat_map(|(text, identifier)| micro_indices(text.as_ref(), identifier.as_ref()))
        .collect();

    binary_merge(micro)
}
