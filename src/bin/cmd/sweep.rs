// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Sweep command - re-check every fixture in the shared directory.

use clap::Args;

use cacheconf::ConformanceRunner;

use crate::common::{build_config, output_json_or, sweep_with_progress, GlobalArgs, Result};

/// Sweep the fixture directory.
#[derive(Args, Clone, Debug)]
pub struct SweepCmd {
    /// Do not write re-encoded fixtures back
    #[arg(long)]
    no_write_back: bool,
}

impl SweepCmd {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let mut config = build_config(global)?;
        if self.no_write_back {
            config.write_back = false;
        }
        if config.output_dir.is_none() {
            anyhow::bail!("no fixture directory: pass --out-dir or set rustOutPath");
        }

        let runner = ConformanceRunner::new(&config);
        let report = sweep_with_progress(&runner)?;

        output_json_or(global.json, &report, || {
            for outcome in &report.outcomes {
                println!("{outcome}");
            }
            println!("{report}");
            Ok(())
        })?;

        if !report.is_conformant() {
            anyhow::bail!("{} fixture(s) failed", report.failed());
        }
        Ok(())
    }
}
