// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Run command - every scenario followed by the fixture sweep.

use clap::Args;

use cacheconf::{ConformanceReport, ConformanceRunner};

use crate::common::{build_config, output_json_or, sweep_with_progress, GlobalArgs, Result};

/// Run all scenarios.
#[derive(Args, Clone, Debug)]
pub struct RunCmd {
    /// Skip the fixture sweep
    #[arg(long)]
    no_sweep: bool,
}

impl RunCmd {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = build_config(global)?;
        let runner = ConformanceRunner::new(&config);

        let mut report = ConformanceReport {
            scenarios: runner.run_scenarios(),
            sweep: None,
        };
        if !self.no_sweep {
            report.sweep = Some(sweep_with_progress(&runner)?);
        }

        output_json_or(global.json, &report, || {
            for scenario in &report.scenarios {
                let status = if scenario.passed { "PASS" } else { "FAIL" };
                match &scenario.detail {
                    Some(detail) => println!("{status} {}: {detail}", scenario.name),
                    None => println!("{status} {}", scenario.name),
                }
                for path in &scenario.fixtures {
                    println!("  wrote {}", path.display());
                }
            }
            if let Some(sweep) = &report.sweep {
                for outcome in &sweep.outcomes {
                    println!("{outcome}");
                }
                println!("{sweep}");
            }
            Ok(())
        })?;

        if !report.is_conformant() {
            anyhow::bail!("implementation is not conformant");
        }
        Ok(())
    }
}
