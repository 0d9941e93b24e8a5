// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Harness configuration.
//!
//! Sources, later ones winning: built-in defaults, environment variables,
//! a TOML file, then command-line flags applied by the binary.
//!
//! ```toml
//! output_dir = "/shared/fixtures"
//! origin = "rust"
//! pretty = true
//! write_back = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::encoding::JsonLayout;
use crate::io::{FixtureStore, DEFAULT_EXTENSION, DEFAULT_ORIGIN};

/// Output directory variable, named after `goOutPath` and `javaOutPath`.
pub const OUTPUT_DIR_ENV: &str = "rustOutPath";

/// Origin tag override.
pub const ORIGIN_ENV: &str = "CACHECONF_ORIGIN";

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid origin tag '{0}': expected one or more ASCII letters")]
    InvalidOrigin(String),

    #[error("invalid fixture extension '{0}'")]
    InvalidExtension(String),
}

impl From<ConfigError> for crate::HarnessError {
    fn from(err: ConfigError) -> Self {
        crate::HarnessError::config(err.to_string())
    }
}

/// Settings of a conformance run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Shared fixture directory; `None` disables persistence.
    pub output_dir: Option<PathBuf>,
    /// Tag written between `_` and the timestamp in fixture names.
    pub origin: String,
    /// Fixture extension, without the dot.
    pub extension: String,
    /// Pretty-print encoded payloads.
    pub pretty: bool,
    pub write_sidecars: bool,
    /// Write re-encoded payloads back during the sweep.
    pub write_back: bool,
    pub create_output_dir: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            origin: DEFAULT_ORIGIN.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            pretty: true,
            write_sidecars: true,
            write_back: true,
            create_output_dir: true,
        }
    }
}

/// File representation; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    output_dir: Option<PathBuf>,
    origin: Option<String>,
    extension: Option<String>,
    pretty: Option<bool>,
    write_sidecars: Option<bool>,
    write_back: Option<bool>,
    create_output_dir: Option<bool>,
}

impl HarnessConfig {
    /// Defaults, then environment, then the optional TOML file; validated.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default().with_env();
        if let Some(path) = config_file {
            config = config.merge_toml_file(path)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Apply the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Apply variables from `lookup`. An empty `rustOutPath` disables
    /// persistence.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(OUTPUT_DIR_ENV) {
            self.output_dir = non_empty_dir(PathBuf::from(dir));
        }
        if let Some(origin) = lookup(ORIGIN_ENV).filter(|o| !o.is_empty()) {
            self.origin = origin;
        }
        self
    }

    /// Overlay the keys present in a TOML file.
    pub fn merge_toml_file(self, path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.merge_toml(&text, &path.display().to_string())
    }

    /// Overlay the keys present in TOML text.
    pub fn merge_toml_str(self, text: &str) -> Result<Self, ConfigError> {
        self.merge_toml(text, "<string>")
    }

    fn merge_toml(mut self, text: &str, origin_label: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin_label.to_string(),
            source,
        })?;

        if let Some(dir) = file.output_dir {
            self.output_dir = non_empty_dir(dir);
        }
        if let Some(origin) = file.origin {
            self.origin = origin;
        }
        if let Some(extension) = file.extension {
            self.extension = extension.trim_start_matches('.').to_string();
        }
        if let Some(pretty) = file.pretty {
            self.pretty = pretty;
        }
        if let Some(sidecars) = file.write_sidecars {
            self.write_sidecars = sidecars;
        }
        if let Some(write_back) = file.write_back {
            self.write_back = write_back;
        }
        if let Some(create) = file.create_output_dir {
            self.create_output_dir = create;
        }
        Ok(self)
    }

    /// Check the origin tag and extension.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.origin.is_empty() || !self.origin.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidOrigin(self.origin.clone()));
        }
        if self.extension.is_empty()
            || !self.extension.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ConfigError::InvalidExtension(self.extension.clone()));
        }
        Ok(())
    }

    pub fn json_layout(&self) -> JsonLayout {
        if self.pretty {
            JsonLayout::Pretty
        } else {
            JsonLayout::Compact
        }
    }

    /// Fixture store configured from these settings.
    pub fn fixture_store(&self) -> FixtureStore {
        FixtureStore::new(self.output_dir.clone())
            .with_origin(&self.origin)
            .with_extension(&self.extension)
            .with_sidecars(self.write_sidecars)
            .with_create_dir(self.create_output_dir)
    }
}

fn non_empty_dir(dir: PathBuf) -> Option<PathBuf> {
    (!dir.as_os_str().is_empty()).then_some(dir)
}
