
use crate::index::{BuildStrategy, IndexBuilder, PrefixIndex};

/// Word list of the demo: fruit, animals, and a few shared stems.
pub(super) fn sample_words() -> Vec<&'static str> {
    vec![
        "apple",
        "application",
        "apply",
        "apricot",
        "banana",
        "band",
        "bandana",
        "bank",
        "cat",
        "car",
        "card",
        "care",
        "careful",
        "dog",
        "door",
        "double",
        "elephant",
        "eleven",
        "elevator",
    ]
}

/// Build with every strategy and assert they agree; returns the sorted-range index.
pub(super) fn build_all_strategies(words: &[&str]) -> PrefixIndex {
    let brute = IndexBuilder::new()
        .strategy(BuildStrategy::BruteForce)
        .build(words)
        .unwrap();
    let sorted = IndexBuilder::new()
        .strategy(BuildStrategy::SortedRange)
        .build(words)
        .unwrap();
    assert_eq!(brute, sorted, "strategies disagree for {words:?}");
    sorted
}
