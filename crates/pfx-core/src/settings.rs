//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`
//!
//! Settings only configure how indexes are built and queried; every
//! `PrefixIndex` is still owned by whoever built it.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::index::BuildStrategy;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub build: BuildSettings,
    pub query: QuerySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSettings {
    pub strategy: BuildStrategy,
    /// 0 means unlimited.
    pub max_prefixes: usize,
    #[serde(default)]
    pub parallel: bool,
}

impl BuildSettings {
    /// Prefix budget, or `None` when unlimited.
    pub fn prefix_budget(&self) -> Option<usize> {
        (self.max_prefixes > 0).then_some(self.max_prefixes)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuerySettings {
    pub default_limit: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.query.default_limit == 0 {
        return Err(SettingsError::InvalidValue {
            field: "query.default_limit".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.build.strategy, BuildStrategy::SortedRange);
        assert_eq!(s.build.max_prefixes, 0);
        assert_eq!(s.build.prefix_budget(), None);
        assert!(!s.build.parallel);
        assert_eq!(s.query.default_limit, 10);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[build]
strategy = "brute-force"
max_prefixes = 5000
parallel = true

[query]
default_limit = 3
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.build.strategy, BuildStrategy::BruteForce);
        assert_eq!(s.build.prefix_budget(), Some(5000));
        assert!(s.build.parallel);
        assert_eq!(s.query.default_limit, 3);
    }

    #[test]
    fn parallel_defaults_to_false() {
        let toml = r#"
[build]
strategy = "sorted-range"
max_prefixes = 0

[query]
default_limit = 10
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert!(!s.build.parallel);
    }

    #[test]
    fn error_zero_default_limit() {
        let toml = DEFAULT_SETTINGS_TOML.replace("default_limit = 10", "default_limit = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(
            matches!(err, SettingsError::InvalidValue { ref field, .. } if field == "query.default_limit")
        );
    }

    #[test]
    fn error_unknown_strategy() {
        let toml = DEFAULT_SETTINGS_TOML.replace("\"sorted-range\"", "\"trie\"");
        assert!(matches!(
            parse_settings_toml(&toml),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[build]
strategy = "sorted-range"
max_prefixes = 0
"#;
        assert!(matches!(
            parse_settings_toml(toml),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn error_invalid_toml_syntax() {
        assert!(matches!(
            parse_settings_toml("not valid [[[toml"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn default_toml_matches_embedded() {
        assert_eq!(default_toml(), DEFAULT_SETTINGS_TOML);
    }
}
