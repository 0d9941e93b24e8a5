// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixture file naming.
//!
//! Fixtures are named `<TypeName>_<origin><unixMillis>.<ext>`, e.g.
//! `EagerCacheRuleSpec_go1699999999999.json`. Readers in every language
//! recover the type name by splitting the file name on `.`, `_` and ASCII
//! digits and taking the first non-empty token, so type names that contain
//! digits or underscores cannot round-trip through a file name.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::core::{HarnessError, Result};

const FIXTURE_NAME_PATTERN: &str = r"^([A-Za-z]+)_([A-Za-z]*)(\d+)\.([A-Za-z0-9]+)$";

/// Build a fixture file name.
///
/// `extension` may be given with or without its leading dot.
pub fn fixture_file_name(type_name: &str, origin: &str, millis: i64, extension: &str) -> String {
    format!(
        "{type_name}_{origin}{millis}.{}",
        extension.trim_start_matches('.')
    )
}

/// Derive the type name from a fixture file name.
///
/// Returns the first non-empty token after splitting on `.`, `_` and ASCII
/// digits. `TABLE_1.json` yields `TABLE`.
///
/// # Errors
///
/// `InvalidFixtureName` when no token remains (e.g. `123.json`).
pub fn derive_type_name(file_name: &str) -> Result<String> {
    file_name
        .split(|c: char| c == '.' || c == '_' || c.is_ascii_digit())
        .find(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or_else(|| HarnessError::invalid_fixture_name(file_name))
}

/// Whether a type name survives [`derive_type_name`] unchanged.
pub fn is_portable_type_name(type_name: &str) -> bool {
    !type_name.is_empty()
        && !type_name
            .chars()
            .any(|c| c == '.' || c == '_' || c.is_ascii_digit())
}

/// A fixture file name split into its parts.
///
/// Only names following the full convention parse; foreign files that
/// merely start with a type name still resolve through
/// [`derive_type_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureName {
    pub type_name: String,
    pub origin: String,
    pub millis: i64,
    pub extension: String,
}

impl FixtureName {
    /// Parse a file name, returning `None` when it does not follow the
    /// `<TypeName>_<origin><millis>.<ext>` convention.
    pub fn parse(file_name: &str) -> Option<Self> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN
            .get_or_init(|| Regex::new(FIXTURE_NAME_PATTERN).expect("fixture name pattern"));

        let caps = pattern.captures(file_name)?;
        Some(Self {
            type_name: caps[1].to_string(),
            origin: caps[2].to_string(),
            millis: caps[3].parse().ok()?,
            extension: caps[4].to_string(),
        })
    }
}

impl fmt::Display for FixtureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&fixture_file_name(
            &self.type_name,
            &self.origin,
            self.millis,
            &self.extension,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_file_name() {
        assert_eq!(
            fixture_file_name("EagerCacheRuleSpec", "rust", 1700000000123, "json"),
            "EagerCacheRuleSpec_rust1700000000123.json"
        );
        assert_eq!(fixture_file_name("Value", "go", 5, ".json"), "Value_go5.json");
    }

    #[test]
    fn test_derive_type_name() {
        assert_eq!(
            derive_type_name("EagerCacheRuleSpec_go1699999999999.json").unwrap(),
            "EagerCacheRuleSpec"
        );
        assert_eq!(derive_type_name("CacheConf_java17.json").unwrap(), "CacheConf");
        assert_eq!(derive_type_name("TABLE_1.json").unwrap(), "TABLE");
        assert_eq!(derive_type_name("_leading.json").unwrap(), "leading");
    }

    #[test]
    fn test_derive_type_name_empty() {
        let err = derive_type_name("123.json").unwrap_err();
        assert!(matches!(err, HarnessError::InvalidFixtureName { .. }));
        assert!(derive_type_name("").is_err());
    }

    #[test]
    fn test_portable_type_names() {
        assert!(is_portable_type_name("EagerCacheRuleSpec"));
        assert!(!is_portable_type_name("CacheRuleV2"));
        assert!(!is_portable_type_name("cache_rule"));
        assert!(!is_portable_type_name(""));
    }

    #[test]
    fn test_fixture_name_parse() {
        let name = FixtureName::parse("EagerCacheRuleSpec_go1699999999999.json").unwrap();
        assert_eq!(name.type_name, "EagerCacheRuleSpec");
        assert_eq!(name.origin, "go");
        assert_eq!(name.millis, 1699999999999);
        assert_eq!(name.extension, "json");
        assert_eq!(name.to_string(), "EagerCacheRuleSpec_go1699999999999.json");
    }

    #[test]
    fn test_fixture_name_parse_rejects_foreign() {
        assert!(FixtureName::parse("notes.json").is_none());
        assert!(FixtureName::parse("Value_rust12.json.meta.toml").is_none());
        assert!(FixtureName::parse("Value_rust.json").is_none());
    }
}
