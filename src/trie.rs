//! Character-level prefix trie over the indexed token set
//!
//! Nodes live in an arena and address their children by index. The trie is a
//! derived view of the index keys: it is rebuilt wholesale whenever the key
//! set changes, never edited to track individual updates.

use rustc_hash::FxHashMap;

/// Arena slot of the root node
const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// The node's fragment: the character it spells, also its key in the
    /// parent's child map. `None` only for the root.
    fragment: Option<char>,
    /// A complete word ends here
    is_word: bool,
    children: FxHashMap<char, usize>,
}

impl TrieNode {
    fn new(fragment: char) -> Self {
        Self {
            fragment: Some(fragment),
            is_word: false,
            children: FxHashMap::default(),
        }
    }
}

/// Uncompressed prefix trie: one node per character
#[derive(Debug, Clone)]
pub struct PrefixTrie {
    nodes: Vec<TrieNode>,
    word_count: usize,
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixTrie {
    /// Create a trie holding only the empty root
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            word_count: 0,
        }
    }

    /// Build from already-normalized tokens; duplicates are harmless
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for token in tokens {
            trie.insert(token.as_ref());
        }
        trie
    }

    /// Insert a word as a chain of single-character nodes
    ///
    /// Returns false if the word was already present. The empty word is
    /// never stored.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let mut node = ROOT;
        for ch in word.chars() {
            node = self.child_or_insert(node, ch);
        }

        let newly_added = !self.nodes[node].is_word;
        self.nodes[node].is_word = true;
        if newly_added {
            self.word_count += 1;
        }
        newly_added
    }

    fn child_or_insert(&mut self, parent: usize, ch: char) -> usize {
        if let Some(&child) = self.nodes[parent].children.get(&ch) {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(TrieNode::new(ch));
        self.nodes[parent].children.insert(ch, child);
        child
    }

    /// Structural union: child maps are unioned recursively, word flags OR-ed
    ///
    /// Walks with an explicit stack of `(into, from)` node pairs, so a single
    /// very long word cannot exhaust the call stack.
    pub fn merge(&mut self, other: &PrefixTrie) {
        let mut pending = vec![(ROOT, ROOT)];

        while let Some((into, from)) = pending.pop() {
            let source = &other.nodes[from];
            if source.is_word && !self.nodes[into].is_word {
                self.nodes[into].is_word = true;
                self.word_count += 1;
            }

            for (&ch, &other_child) in &source.children {
                let child = self.child_or_insert(into, ch);
                pending.push((child, other_child));
            }
        }
    }

    /// Walk `prefix` from the root; the node reached is the anchor
    fn anchor(&self, prefix: &str) -> Option<usize> {
        let mut node = ROOT;
        for ch in prefix.chars() {
            node = *self.nodes[node].children.get(&ch)?;
        }
        Some(node)
    }

    /// Every stored word starting with `prefix`, in no particular order
    ///
    /// `prefix` must already be normalized. An empty prefix yields nothing.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let Some(last) = prefix.chars().last() else {
            return Vec::new();
        };
        let Some(anchor) = self.anchor(prefix) else {
            return Vec::new();
        };
        debug_assert_eq!(self.nodes[anchor].fragment, Some(last));

        // The anchor still carries the prefix's last character, so the walk
        // starts from the prefix without it.
        self.collect(anchor, String::from(&prefix[..prefix.len() - last.len_utf8()]))
    }

    /// Depth-first enumeration of the words under `start`
    ///
    /// `base` is the text spelled by the path above `start`. The stack holds
    /// `(node, buffer length before the node's fragment)`, so the walk is
    /// iterative regardless of word length.
    fn collect(&self, start: usize, base: String) -> Vec<String> {
        let mut words = Vec::new();
        let mut buffer = base;
        let mut pending = vec![(start, buffer.len())];

        while let Some((node, depth)) = pending.pop() {
            buffer.truncate(depth);
            let current = &self.nodes[node];
            if let Some(ch) = current.fragment {
                buffer.push(ch);
            }

            if current.is_word {
                words.push(buffer.clone());
            }
            for &child in current.children.values() {
                pending.push((child, buffer.len()));
            }
        }

        words
    }

    /// Every stored word
    pub fn words(&self) -> Vec<String> {
        self.collect(ROOT, String::new())
    }

    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty() && self.anchor(word).is_some_and(|node| self.nodes[node].is_word)
    }

    /// Number of stored words
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Arena size, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn sorted(mut words: Vec<String>) -> Vec<String> {
        words.sort();
        words
    }

    #[test]
    fn test_empty_trie() {
        let trie = PrefixTrie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
        assert!(trie.words_with_prefix("ab").is_empty());
    }

    #[test]
    fn test_shared_prefix_paths() {
        let trie = PrefixTrie::from_tokens(["swipe", "swift", "sw"]);
        // root + s,w + i + p,e + f,t
        assert_eq!(trie.node_count(), 8);
        assert_eq!(trie.len(), 3);
        assert!(trie.contains("sw"));
        assert!(!trie.contains("swi"));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut trie = PrefixTrie::new();
        assert!(trie.insert("app"));
        assert!(!trie.insert("app"));
        assert!(!trie.insert(""));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_words_with_prefix() {
        let trie = PrefixTrie::from_tokens([
            "swipe", "swype", "swiping", "swiftkey", "switched", "switch", "hello", "s",
        ]);
        assert_eq!(
            sorted(trie.words_with_prefix("sw")),
            vec!["swiftkey", "swipe", "swiping", "switch", "switched", "swype"]
        );
        assert_eq!(
            sorted(trie.words_with_prefix("switch")),
            vec!["switch", "switched"]
        );
        assert!(trie.words_with_prefix("swx").is_empty());
        assert!(trie.words_with_prefix("").is_empty());
    }

    #[test]
    fn test_anchor_is_word() {
        let trie = PrefixTrie::from_tokens(["app", "apple"]);
        assert_eq!(sorted(trie.words_with_prefix("app")), vec!["app", "apple"]);
    }

    #[test]
    fn test_multibyte_prefix() {
        let trie = PrefixTrie::from_tokens(["café", "cafés", "cafe"]);
        assert_eq!(sorted(trie.words_with_prefix("café")), vec!["café", "cafés"]);
    }

    #[test]
    fn test_merge_unions_words() {
        let mut left = PrefixTrie::from_tokens(["swipe", "app"]);
        let right = PrefixTrie::from_tokens(["swift", "app", "ap"]);
        left.merge(&right);

        assert_eq!(left.len(), 4);
        assert_eq!(sorted(left.words()), vec!["ap", "app", "swift", "swipe"]);
        assert_eq!(left.node_count(), PrefixTrie::from_tokens(left.words()).node_count());
    }

    #[test]
    fn test_very_long_word() {
        let long = "ab".repeat(60_000);
        let mut trie = PrefixTrie::from_tokens([long.as_str(), "abc"]);
        assert_eq!(trie.node_count(), 120_002);

        let words = sorted(trie.words_with_prefix("ab"));
        assert_eq!(words.len(), 2);
        assert_eq!(words[0], long);

        trie.merge(&PrefixTrie::from_tokens([format!("{long}z")]));
        assert_eq!(trie.len(), 3);
        assert!(trie.contains(&format!("{long}z")));
        assert_eq!(trie.words().len(), 3);
    }

    proptest! {
        /// Property: the trie holds exactly the inserted word set
        #[test]
        fn prop_words_match_inserted(tokens in prop::collection::vec("[a-e]{1,5}", 0..30)) {
            let trie = PrefixTrie::from_tokens(&tokens);
            let expected: BTreeSet<String> = tokens.into_iter().collect();
            let actual: BTreeSet<String> = trie.words().into_iter().collect();
            prop_assert_eq!(trie.len(), expected.len());
            prop_assert_eq!(actual, expected);
        }

        /// Property: prefix enumeration equals filtering the word set
        #[test]
        fn prop_prefix_matches_filter(
            tokens in prop::collection::vec("[a-c]{1,4}", 0..30),
            prefix in "[a-c]{1,2}",
        ) {
            let trie = PrefixTrie::from_tokens(&tokens);
            let expected: BTreeSet<String> =
                tokens.into_iter().filter(|t| t.starts_with(&prefix)).collect();
            let actual: BTreeSet<String> = trie.words_with_prefix(&prefix).into_iter().collect();
            prop_assert_eq!(actual, expected);
        }

        /// Property: merging tries equals building from the union
        #[test]
        fn prop_merge_equals_union(
            a in prop::collection::vec("[a-c]{1,4}", 0..15),
            b in prop::collection::vec("[a-c]{1,4}", 0..15),
        ) {
            let mut merged = PrefixTrie::from_tokens(&a);
            merged.merge(&PrefixTrie::from_tokens(&b));
            let union = PrefixTrie::from_tokens(a.iter().chain(b.iter()));
            prop_assert_eq!(merged.len(), union.len());
            prop_assert_eq!(merged.node_count(), union.node_count());
            let merged_words: BTreeSet<String> = merged.words().into_iter().collect();
            let union_words: BTreeSet<String> = union.words().into_iter().collect();
            prop_assert_eq!(merged_words, union_words);
        }
    }
}
