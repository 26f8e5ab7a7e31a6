use super::PrefixSearch;
use crate::unicode::{char_prefixes, fold_case};

/// Prefix search without precomputation: every query scans the word list.
///
/// Returns exactly what a [`PrefixIndex`](super::PrefixIndex) built from the
/// same words returns. Build cost is one sort; query cost is O(N).
#[derive(Debug, Clone, Default)]
pub struct LinearScan {
    /// (folded, original), distinct, sorted by original.
    words: Vec<(String, String)>,
}

impl LinearScan {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut originals: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().to_string())
            .collect();
        originals.sort_unstable();
        originals.dedup();
        let words = originals
            .into_iter()
            .map(|w| (fold_case(&w), w))
            .collect();
        Self { words }
    }

    /// Distinct words held.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl PrefixSearch for LinearScan {
    fn search(&self, query: &str) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }
        let key = fold_case(query);
        let matches: Vec<&String> = self
            .words
            .iter()
            .filter(|(folded, _)| folded.starts_with(&key))
            .map(|(_, word)| word)
            .collect();
        // A folded form can start with `key` mid-character (e.g. "İ" folds to
        // "i\u{307}"); the query only counts when some word has a prefix that
        // folds to exactly `key`.
        let is_prefix_key = matches
            .iter()
            .any(|word| char_prefixes(word).any(|p| fold_case(p) == key));
        if !is_prefix_key {
            return Vec::new();
        }
        matches.into_iter().cloned().collect()
    }
}
