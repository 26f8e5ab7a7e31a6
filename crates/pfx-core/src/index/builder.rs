use std::collections::{BTreeSet, HashMap, TryReserveError};

use tracing::{debug, debug_span};

use super::{BuildError, BuildStrategy, PrefixIndex};
use crate::settings::BuildSettings;
use crate::unicode::{char_prefixes, fold_case};

/// A word paired with its case-folded form.
type FoldedWord<'a> = (String, &'a str);

/// Builds a [`PrefixIndex`] from a word list.
///
/// Input may be in any order and contain duplicates, mixed case, or empty
/// strings; the resulting entries depend only on the set of distinct words.
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    strategy: BuildStrategy,
    max_prefixes: Option<usize>,
    parallel: bool,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &BuildSettings) -> Self {
        Self {
            strategy: settings.strategy,
            max_prefixes: settings.prefix_budget(),
            parallel: settings.parallel,
        }
    }

    pub fn strategy(mut self, strategy: BuildStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Reject inputs producing more than `limit` distinct prefixes.
    pub fn max_prefixes(mut self, limit: Option<usize>) -> Self {
        self.max_prefixes = limit;
        self
    }

    /// Compute match sets on the rayon pool. Without the `parallel` feature
    /// the build falls back to a sequential one.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build<I, S>(&self, words: I) -> Result<PrefixIndex, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let owned: Vec<S> = words.into_iter().collect();
        let words: Vec<&str> = owned.iter().map(|w| w.as_ref()).collect();
        let _span = debug_span!(
            "build_index",
            words = words.len(),
            strategy = self.strategy.as_str()
        )
        .entered();

        let keys = distinct_keys(&words)?;
        if let Some(limit) = self.max_prefixes {
            if keys.len() > limit {
                return Err(BuildError::ResourceExhausted {
                    limit,
                    required: keys.len(),
                });
            }
        }

        let entries = if self.parallel {
            self.build_parallel(&words, keys)?
        } else {
            match self.strategy {
                BuildStrategy::BruteForce => build_brute_force(&words, keys.len())?,
                BuildStrategy::SortedRange => build_sorted_range(&words, keys)?,
            }
        };

        let values: usize = entries.values().map(Vec::len).sum();
        debug!(prefixes = entries.len(), values, "index built");
        Ok(PrefixIndex::from_entries(entries))
    }

    #[cfg(feature = "parallel")]
    fn build_parallel(
        &self,
        words: &[&str],
        keys: Vec<String>,
    ) -> Result<HashMap<String, Vec<String>>, BuildError> {
        use rayon::prelude::*;

        let strategy = self.strategy;
        let list = match strategy {
            BuildStrategy::BruteForce => folded_by_original(words)?,
            BuildStrategy::SortedRange => folded_by_key(words)?,
        };
        let computed: Vec<(String, Vec<String>)> = keys
            .into_par_iter()
            .map(|key| -> Result<(String, Vec<String>), TryReserveError> {
                let matches = match strategy {
                    BuildStrategy::BruteForce => {
                        merge_dedup(&[], &scan_matches(&list, &key)?)?
                    }
                    BuildStrategy::SortedRange => range_matches(&list, &key)?,
                };
                Ok((key, matches))
            })
            .collect::<Result<Vec<_>, TryReserveError>>()?;

        let mut entries = HashMap::new();
        entries.try_reserve(computed.len())?;
        entries.extend(computed);
        Ok(entries)
    }

    #[cfg(not(feature = "parallel"))]
    fn build_parallel(
        &self,
        words: &[&str],
        keys: Vec<String>,
    ) -> Result<HashMap<String, Vec<String>>, BuildError> {
        tracing::warn!("parallel build requested without the `parallel` feature; building sequentially");
        match self.strategy {
            BuildStrategy::BruteForce => build_brute_force(words, keys.len()),
            BuildStrategy::SortedRange => build_sorted_range(words, keys),
        }
    }
}

/// Dedup-union of two entries: sorted ascending, every word once.
///
/// Idempotent and commutative, so entries can be merged in any order.
pub fn merge_dedup(
    existing: &[String],
    incoming: &[String],
) -> Result<Vec<String>, TryReserveError> {
    let mut merged = Vec::new();
    merged.try_reserve_exact(existing.len() + incoming.len())?;
    merged.extend_from_slice(existing);
    merged.extend_from_slice(incoming);
    merged.sort_unstable();
    merged.dedup();
    Ok(merged)
}

/// Every distinct folded prefix of every word, ascending.
fn distinct_keys(words: &[&str]) -> Result<Vec<String>, TryReserveError> {
    let mut set = BTreeSet::new();
    for word in words {
        for prefix in char_prefixes(word) {
            set.insert(fold_case(prefix));
        }
    }
    let mut keys = Vec::new();
    keys.try_reserve_exact(set.len())?;
    keys.extend(set);
    Ok(keys)
}

fn fold_all<'a>(words: &[&'a str]) -> Result<Vec<FoldedWord<'a>>, TryReserveError> {
    let mut list = Vec::new();
    list.try_reserve_exact(words.len())?;
    list.extend(words.iter().map(|w| (fold_case(w), *w)));
    Ok(list)
}

/// All words (duplicates kept) sorted by original value.
fn folded_by_original<'a>(
    words: &[&'a str],
) -> Result<Vec<FoldedWord<'a>>, TryReserveError> {
    let mut list = fold_all(words)?;
    list.sort_by(|a, b| a.1.cmp(b.1));
    Ok(list)
}

/// Distinct words sorted by folded form, ties broken by original value.
fn folded_by_key<'a>(
    words: &[&'a str],
) -> Result<Vec<FoldedWord<'a>>, TryReserveError> {
    let mut list = fold_all(words)?;
    list.sort_unstable();
    list.dedup();
    Ok(list)
}

/// Every word in `list` whose folded form starts with `key`, in list order.
fn scan_matches(list: &[FoldedWord<'_>], key: &str) -> Result<Vec<String>, TryReserveError> {
    let mut matches = Vec::new();
    for (folded, word) in list {
        if folded.starts_with(key) {
            matches.try_reserve(1)?;
            matches.push((*word).to_string());
        }
    }
    Ok(matches)
}

/// Words of a `folded_by_key` list starting with `key`, sorted by original value.
///
/// Folded forms starting with `key` are contiguous and begin at the first
/// folded form not less than `key`.
fn range_matches(list: &[FoldedWord<'_>], key: &str) -> Result<Vec<String>, TryReserveError> {
    let start = list.partition_point(|(folded, _)| folded.as_str() < key);
    let len = list[start..].partition_point(|(folded, _)| folded.starts_with(key));
    let mut matches = Vec::new();
    matches.try_reserve_exact(len)?;
    matches.extend(
        list[start..start + len]
            .iter()
            .map(|(_, word)| (*word).to_string()),
    );
    matches.sort_unstable();
    Ok(matches)
}

/// Reference construction: for each prefix of each word, rescan the full word
/// list and merge the matches into that prefix's entry.
fn build_brute_force(
    words: &[&str],
    key_count: usize,
) -> Result<HashMap<String, Vec<String>>, BuildError> {
    let list = folded_by_original(words)?;
    let mut entries: HashMap<String, Vec<String>> = HashMap::new();
    entries.try_reserve(key_count)?;

    for (_, word) in &list {
        for prefix in char_prefixes(word) {
            let key = fold_case(prefix);
            let matches = scan_matches(&list, &key)?;
            let entry = entries.entry(key).or_default();
            *entry = merge_dedup(entry, &matches)?;
        }
    }
    Ok(entries)
}

fn build_sorted_range(
    words: &[&str],
    keys: Vec<String>,
) -> Result<HashMap<String, Vec<String>>, BuildError> {
    let list = folded_by_key(words)?;
    let mut entries: HashMap<String, Vec<String>> = HashMap::new();
    entries.try_reserve(keys.len())?;

    for key in keys {
        let matches = range_matches(&list, &key)?;
        entries.insert(key, matches);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_merge_dedup() {
        let cases: &[(&[&str], &[&str], &[&str])] = &[
            (&["a", "b"], &["c", "d"], &["a", "b", "c", "d"]),
            (&["a", "b"], &["b", "c"], &["a", "b", "c"]),
            (&[], &["a", "b"], &["a", "b"]),
            (&["a", "b"], &[], &["a", "b"]),
            (&[], &[], &[]),
            (&["a", "a", "b"], &["b", "c", "c"], &["a", "b", "c"]),
        ];
        for (left, right, expected) in cases {
            let merged = merge_dedup(&strings(left), &strings(right)).unwrap();
            assert_eq!(merged, strings(expected), "merge_dedup({left:?}, {right:?})");
        }
    }

    #[test]
    fn test_merge_dedup_commutative_and_idempotent() {
        let a = strings(&["pear", "Apple", "apple"]);
        let b = strings(&["apple", "zebra"]);
        let ab = merge_dedup(&a, &b).unwrap();
        assert_eq!(ab, merge_dedup(&b, &a).unwrap());
        assert_eq!(ab, merge_dedup(&ab, &ab).unwrap());
        assert_eq!(ab, strings(&["Apple", "apple", "pear", "zebra"]));
    }

    #[test]
    fn test_distinct_keys() {
        let keys = distinct_keys(&["cat", "Car", "CAT"]).unwrap();
        assert_eq!(keys, strings(&["c", "ca", "car", "cat"]));
        assert!(distinct_keys(&["", ""]).unwrap().is_empty());
    }

    #[test]
    fn test_range_matches_contiguous() {
        let list = folded_by_key(&["band", "Bandana", "bank", "banana", "bar", "ban"]).unwrap();
        assert_eq!(
            range_matches(&list, "ban").unwrap(),
            strings(&["Bandana", "ban", "banana", "band", "bank"])
        );
        assert_eq!(range_matches(&list, "band").unwrap(), strings(&["Bandana", "band"]));
        assert!(range_matches(&list, "bat").unwrap().is_empty());
        assert!(range_matches(&list, "a").unwrap().is_empty());
        assert!(range_matches(&list, "z").unwrap().is_empty());
    }

    #[test]
    fn test_scan_matches_keeps_duplicates() {
        let list = folded_by_original(&["apple", "app", "apple"]).unwrap();
        assert_eq!(scan_matches(&list, "appl").unwrap(), strings(&["apple", "apple"]));
    }

    #[test]
    fn test_budget_exceeded() {
        let err = IndexBuilder::new()
            .max_prefixes(Some(4))
            .build(["hello"])
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::ResourceExhausted {
                limit: 4,
                required: 5
            }
        ));
    }

    #[test]
    fn test_budget_exact_fit() {
        let index = IndexBuilder::new()
            .max_prefixes(Some(5))
            .build(["hello", "HELLO"])
            .unwrap();
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_budget_empty_input() {
        let index = IndexBuilder::new()
            .max_prefixes(Some(0))
            .build(Vec::<String>::new())
            .unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_from_settings() {
        let settings = BuildSettings {
            strategy: BuildStrategy::BruteForce,
            max_prefixes: 0,
            parallel: false,
        };
        let builder = IndexBuilder::from_settings(&settings);
        assert_eq!(builder.strategy, BuildStrategy::BruteForce);
        assert_eq!(builder.max_prefixes, None);
    }
}
