use std::collections::HashMap;

use super::{BuildError, IndexBuilder, PrefixSearch};
use crate::unicode::fold_case;

/// Immutable map from case-folded prefix to the words starting with it.
///
/// Every query returns owned copies; nothing hands out references into the
/// stored entries, so an index can be shared across threads without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixIndex {
    entries: HashMap<String, Vec<String>>,
}

/// Size summary of a built index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Distinct prefixes.
    pub prefixes: usize,
    /// Words stored across all entries.
    pub values: usize,
    /// Length of the largest entry.
    pub longest_entry: usize,
}

impl PrefixIndex {
    /// Build with the default [`IndexBuilder`] (sorted-range, no budget).
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match IndexBuilder::new().build(words) {
            Ok(index) => index,
            // No budget is set; the only remaining failure is allocation.
            Err(BuildError::Allocation(e)) => panic!("allocation failed while building index: {e}"),
            Err(e @ BuildError::ResourceExhausted { .. }) => unreachable!("{e}"),
        }
    }

    pub(crate) fn from_entries(entries: HashMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    /// Words starting with `query`, ignoring case. Empty for an empty query.
    pub fn search(&self, query: &str) -> Vec<String> {
        if query.is_empty() {
            return Vec::new();
        }
        self.entries
            .get(&fold_case(query))
            .cloned()
            .unwrap_or_default()
    }

    /// At most `limit` words of `search(query)`, order preserved.
    pub fn search_with_limit(&self, query: &str, limit: usize) -> Vec<String> {
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }
        match self.entries.get(&fold_case(query)) {
            Some(words) => words[..limit.min(words.len())].to_vec(),
            None => Vec::new(),
        }
    }

    pub fn contains_prefix(&self, query: &str) -> bool {
        !query.is_empty() && self.entries.contains_key(&fold_case(query))
    }

    /// Every stored prefix, ascending.
    pub fn all_prefixes(&self) -> Vec<String> {
        let mut prefixes: Vec<String> = self.entries.keys().cloned().collect();
        prefixes.sort_unstable();
        prefixes
    }

    /// Every `(prefix, words)` pair, ascending by prefix.
    pub fn entries(&self) -> Vec<(String, Vec<String>)> {
        let mut pairs: Vec<(String, Vec<String>)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    /// Number of distinct prefixes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            prefixes: self.entries.len(),
            values: self.entries.values().map(Vec::len).sum(),
            longest_entry: self.entries.values().map(Vec::len).max().unwrap_or(0),
        }
    }
}

impl PrefixSearch for PrefixIndex {
    fn search(&self, query: &str) -> Vec<String> {
        PrefixIndex::search(self, query)
    }

    fn search_with_limit(&self, query: &str, limit: usize) -> Vec<String> {
        PrefixIndex::search_with_limit(self, query, limit)
    }
}
