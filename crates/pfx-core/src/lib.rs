//! Precomputed prefix-search index.
//!
//! Every prefix of every word is enumerated once at build time and mapped to
//! the sorted, de-duplicated list of words that begin with it, so a query is a
//! single map lookup. See [`index::PrefixIndex`] and [`index::IndexBuilder`].

pub mod index;
pub mod settings;
pub mod unicode;

pub use index::{BuildError, BuildStrategy, IndexBuilder, PrefixIndex, PrefixSearch};
