// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Emit command - write the reference messages as fixtures.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use cacheconf::runner::{reference_cache_conf, reference_eager_rule};
use cacheconf::{AnyMessage, ConformanceRunner};

use crate::common::{build_config, output_json_or, GlobalArgs, Result};

/// Write reference fixtures.
#[derive(Args, Clone, Debug)]
pub struct EmitCmd {}

#[derive(Serialize)]
struct Emitted {
    type_name: String,
    path: PathBuf,
}

impl EmitCmd {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = build_config(global)?;
        let runner = ConformanceRunner::new(&config);
        if !runner.store().is_enabled() {
            anyhow::bail!("no fixture directory: pass --out-dir or set rustOutPath");
        }

        let messages: Vec<AnyMessage> = vec![
            Box::new(reference_eager_rule()),
            Box::new(reference_cache_conf()),
        ];

        let mut emitted = Vec::new();
        for message in &messages {
            let payload = runner.encode(message.as_ref())?;
            if let Some(path) = runner.store().write(message.type_name(), &payload)? {
                emitted.push(Emitted {
                    type_name: message.type_name().to_string(),
                    path,
                });
            }
        }

        output_json_or(global.json, &emitted, || {
            for item in &emitted {
                println!("{} -> {}", item.type_name, item.path.display());
            }
            Ok(())
        })
    }
}
