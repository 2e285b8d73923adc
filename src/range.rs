//! Occurrence ranges and the ordered range lists stored per identifier.

use serde::{Deserialize, Serialize};

/// Half-open `[start, end)` byte interval of one token occurrence
///
/// Only meaningful against the source string it was produced from; the index
/// stores the range, never the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenRange {
    pub start: usize,
    pub end: usize,
}

impl TokenRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start {start} past end {end}");
        Self { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Re-resolve this range against the text it was produced from
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

impl From<std::ops::Range<usize>> for TokenRange {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Ranges of one token within one identifier
///
/// Always sorted by `(start, end)` with no exact duplicates. Every
/// constructor and merge restores this, so raw input order never leaks out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeList(Vec<TokenRange>);

impl RangeList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn single(range: TokenRange) -> Self {
        Self(vec![range])
    }

    /// Build from ranges in any order, possibly with duplicates
    pub fn from_unsorted(ranges: Vec<TokenRange>) -> Self {
        let mut list = Self(ranges);
        list.normalize();
        list
    }

    /// Concatenate, sort, then drop exact duplicates
    pub fn merge(mut self, other: RangeList) -> RangeList {
        if self.0.is_empty() {
            return other;
        }
        self.0.extend(other.0);
        self.normalize();
        self
    }

    fn normalize(&mut self) {
        self.0.sort_unstable();
        self.0.dedup();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TokenRange> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[TokenRange] {
        &self.0
    }

    /// True if sorted ascending and free of exact duplicates
    pub fn is_well_formed(&self) -> bool {
        self.0.windows(2).all(|w| w[0] < w[1])
    }
}

impl<'a> IntoIterator for &'a RangeList {
    type Item = &'a TokenRange;
    type IntoIter = std::slice::Iter<'a, TokenRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
