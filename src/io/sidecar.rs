// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixture sidecar metadata.
//!
//! A sidecar `<fixture>.meta.toml` records the explicit type tag of a
//! fixture next to it. Other implementations only pick up `.json` files
//! and never see it.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Format, HarnessError, Result};

/// Suffix appended to the fixture file name.
pub const SIDECAR_SUFFIX: &str = ".meta.toml";

/// Metadata stored beside a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureMeta {
    pub type_name: String,
    pub origin: String,
    #[serde(default)]
    pub format: Format,
    pub created_at: DateTime<Utc>,
    /// File name of the fixture this one was re-encoded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,
}

impl FixtureMeta {
    pub fn new(type_name: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            origin: origin.into(),
            format: Format::Json,
            created_at: Utc::now(),
            derived_from: None,
        }
    }

    pub fn with_derived_from(mut self, source: impl Into<String>) -> Self {
        self.derived_from = Some(source.into());
        self
    }

    /// Sidecar path belonging to a fixture path.
    pub fn path_for(fixture: &Path) -> PathBuf {
        let mut name = fixture.as_os_str().to_os_string();
        name.push(SIDECAR_SUFFIX);
        PathBuf::from(name)
    }

    /// Load the sidecar of `fixture`, if one exists.
    ///
    /// # Errors
    ///
    /// `IoReadError` when the sidecar exists but cannot be read or parsed.
    pub fn load_for(fixture: &Path) -> Result<Option<Self>> {
        let path = Self::path_for(fixture);
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| HarnessError::io_read(path.display().to_string(), format!("{e}")))?;
        toml::from_str(&text)
            .map(Some)
            .map_err(|e| HarnessError::io_read(path.display().to_string(), format!("{e}")))
    }

    /// Write this metadata beside `fixture`.
    pub fn store_for(&self, fixture: &Path) -> Result<PathBuf> {
        let path = Self::path_for(fixture);
        let text = toml::to_string(self)
            .map_err(|e| HarnessError::encode("FixtureMeta", format!("{e}")))?;
        fs::write(&path, text)
            .map_err(|e| HarnessError::io_write(path.display().to_string(), format!("{e}")))?;
        Ok(path)
    }
}
