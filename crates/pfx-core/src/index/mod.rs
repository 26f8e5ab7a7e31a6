//! Prefix index construction and lookup.
//!
//! `IndexBuilder` enumerates every prefix of every input word and computes its
//! match set; `PrefixIndex` is the resulting immutable prefix → words map.
//! `LinearScan` answers the same queries without precomputation and serves as
//! the baseline for tests and benchmarks.

mod builder;
mod prefix_index;
mod scan;
#[cfg(test)]
mod tests;

pub use builder::{merge_dedup, IndexBuilder};
pub use prefix_index::{IndexStats, PrefixIndex};
pub use scan::LinearScan;

use std::collections::TryReserveError;

use serde::Deserialize;

/// How the builder discovers the words matching each prefix.
///
/// Both strategies produce identical indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildStrategy {
    /// Rescan the whole word list for every prefix: O(P × N) comparisons.
    BruteForce,
    /// Sort once by folded form; find each prefix's match range with two
    /// binary searches: O(P × log N).
    #[default]
    SortedRange,
}

impl BuildStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildStrategy::BruteForce => "brute-force",
            BuildStrategy::SortedRange => "sorted-range",
        }
    }
}

impl std::str::FromStr for BuildStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brute-force" => Ok(BuildStrategy::BruteForce),
            "sorted-range" => Ok(BuildStrategy::SortedRange),
            other => Err(format!(
                "unknown strategy '{other}' (available: brute-force, sorted-range)"
            )),
        }
    }
}

/// Index construction failure.
///
/// Never produced for an input that merely has no matches: an empty or
/// degenerate word list always builds successfully.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("prefix budget exhausted: {required} distinct prefixes exceed limit of {limit}")]
    ResourceExhausted { limit: usize, required: usize },

    /// Reserving a word list, the key list, the entry map or an entry
    /// vector failed. Individual string allocations are not covered.
    #[error("allocation failed while building index: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Read-only prefix lookup.
pub trait PrefixSearch: Send + Sync {
    /// Words starting with `query` (case-insensitive), original casing,
    /// ascending. Empty for an empty query or no match.
    fn search(&self, query: &str) -> Vec<String>;

    /// `search` truncated to at most `limit` words, order preserved.
    fn search_with_limit(&self, query: &str, limit: usize) -> Vec<String> {
        let mut results = self.search(query);
        results.truncate(limit);
        results
    }
}
