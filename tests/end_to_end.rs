use spanindex::{
    binary_merge, load_index, micro_indices, reduce_merge, save_index, IndexConfig,
    InvertedIndex, TokenRange,
};

const REVIEW: &str = "Hello world how is your app SwiftKey doing?";

fn prefix_tokens(index: &InvertedIndex, prefix: &str) -> Vec<String> {
    index
        .prefix_search(prefix)
        .unwrap()
        .into_iter()
        .map(|m| m.token)
        .collect()
}

#[test]
fn test_range_matches_original_substring() {
    let index = InvertedIndex::new();
    index.index_batch(&[(REVIEW, "review1")]);

    let data = index.lookup_exact("swiftkey").expect("swiftkey indexed");
    let ranges = data.ranges("review1").unwrap();
    assert_eq!(ranges.len(), 1);

    let start = REVIEW.find("SwiftKey").unwrap();
    assert_eq!(ranges.as_slice()[0], TokenRange::new(start, start + "SwiftKey".len()));
    assert_eq!(ranges.as_slice()[0].slice(REVIEW), Some("SwiftKey"));
}

#[test]
fn test_trailing_punctuation_is_a_distinct_token() {
    let index = InvertedIndex::new();
    index.index_batch(&[
        ("I love SwiftKey", "review1"),
        ("switched to swiftkey!", "review2"),
    ]);

    let plain = index.lookup_exact("swiftkey").unwrap();
    let bang = index.lookup_exact("swiftkey!").unwrap();
    assert_eq!(plain.sorted_identifiers(), vec!["review1"]);
    assert_eq!(bang.sorted_identifiers(), vec!["review2"]);
}

#[test]
fn test_prefix_search_corpus() {
    let index = InvertedIndex::new();
    index.index_batch(&[
        ("I swipe and swype", "r1"),
        ("swiping with SwiftKey", "r2"),
        ("switched from another keyboard", "r3"),
        ("will switch back", "r4"),
    ]);

    assert_eq!(
        prefix_tokens(&index, "sw"),
        vec!["swipe", "swype", "switch", "swiping", "swiftkey", "switched"]
    );
    assert_eq!(
        prefix_tokens(&index, "SWI"),
        vec!["swipe", "switch", "swiping", "swiftkey", "switched"]
    );
}

#[test]
fn test_short_prefix_always_empty() {
    let index = InvertedIndex::new();
    index.index_batch(&[("a ab abc", "r1")]);
    assert!(prefix_tokens(&index, "").is_empty());
    assert!(prefix_tokens(&index, "a").is_empty());
}

#[test]
fn test_prefix_results_agree_with_lookup() {
    let index = InvertedIndex::new();
    index.index_batch(&[
        ("switch switch switched", "r1"),
        ("Switch it", "r2"),
    ]);

    for m in index.prefix_search("sw").unwrap() {
        assert_eq!(index.lookup_exact(&m.token), Some(m.data));
    }
}

#[test]
fn test_reindexing_same_pair_is_idempotent() {
    let once = InvertedIndex::new();
    once.index_batch(&[(REVIEW, "review1")]);

    let twice = InvertedIndex::new();
    twice.index_batch(&[(REVIEW, "review1")]);
    twice.index_batch(&[(REVIEW, "review1")]);

    assert_eq!(once.snapshot_data(), twice.snapshot_data());
}

#[test]
fn test_merge_strategies_agree_on_real_text() {
    let micro: Vec<_> = [
        (REVIEW, "review1"),
        ("the app the app the", "review2"),
        ("doing doing? Doing", "review1"),
    ]
    .iter()
    .flat_map(|(text, id)| micro_indices(text, id))
    .collect();

    let mut reversed = micro.clone();
    reversed.reverse();

    let expected = reduce_merge(micro.clone());
    assert_eq!(binary_merge(micro), expected);
    assert_eq!(binary_merge(reversed), expected);
}

#[test]
fn test_persisted_index_answers_same_queries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reviews.spix");

    let index = InvertedIndex::new();
    index.index_batch(&[(REVIEW, "review1"), ("swipe typing", "review2")]);
    save_index(&index.snapshot_data(), &path).unwrap();

    let restored = InvertedIndex::from_data(load_index(&path).unwrap(), IndexConfig::default());
    assert_eq!(prefix_tokens(&restored, "sw"), prefix_tokens(&index, "sw"));
    assert_eq!(restored.lookup_exact("app"), index.lookup_exact("app"));
}
