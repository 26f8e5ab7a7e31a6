//! Subcommand implementations for `pfxtool`.
//!
//! Command functions print to stdout and exit with status 1 on error;
//! the `format_*` helpers they use return `String` so they can be tested.

pub mod config_ops;
pub mod index_ops;
