// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Compare command - semantic comparison of two payload files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use cacheconf::compare::diff_json_text;
use cacheconf::encoding::yaml_to_json_string;
use cacheconf::{equals_text, CodecRegistry, Format, JsonDiff};

use crate::common::{output_json_or, GlobalArgs, Result};

/// Compare two payloads of one type.
#[derive(Args, Clone, Debug)]
pub struct CompareCmd {
    /// Message type name
    #[arg(value_name = "TYPE")]
    type_name: String,

    /// Expected payload
    #[arg(value_name = "A")]
    expected: PathBuf,

    /// Actual payload
    #[arg(value_name = "B")]
    actual: PathBuf,
}

#[derive(Serialize)]
struct Comparison {
    type_name: String,
    equal: bool,
    diffs: Vec<JsonDiff>,
}

/// Read a payload, converting YAML files to JSON.
fn read_payload(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse::<Format>().ok())
        .unwrap_or_default();
    match format {
        Format::Json => Ok(text),
        Format::Yaml => Ok(yaml_to_json_string(&text)?),
    }
}

impl CompareCmd {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let registry = CodecRegistry::with_builtin_types();
        let expected = read_payload(&self.expected)?;
        let actual = read_payload(&self.actual)?;

        let equal = equals_text(&registry, &expected, &actual, &self.type_name)?;
        let diffs = if equal {
            Vec::new()
        } else {
            diff_json_text(&expected, &actual)?
        };

        let comparison = Comparison {
            type_name: self.type_name,
            equal,
            diffs,
        };
        output_json_or(global.json, &comparison, || {
            if comparison.equal {
                println!("equal");
            } else {
                println!("different");
                for diff in &comparison.diffs {
                    println!("  {diff}");
                }
            }
            Ok(())
        })?;

        if !comparison.equal {
            anyhow::bail!("payloads differ");
        }
        Ok(())
    }
}
