// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::io::IsTerminal as _;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cacheconf::{ConformanceRunner, FixtureOutcome, HarnessConfig, SweepReport};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Options shared by every command.
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Shared fixture directory (overrides rustOutPath and the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Origin tag written into fixture names
    #[arg(long, global = true, value_name = "TAG")]
    pub origin: Option<String>,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    pub compact: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Resolve the configuration: defaults, environment, file, then flags.
pub fn build_config(args: &GlobalArgs) -> Result<HarnessConfig> {
    let mut config = HarnessConfig::load(args.config.as_deref())?;
    if let Some(dir) = &args.out_dir {
        config.output_dir = (!dir.as_os_str().is_empty()).then(|| dir.clone());
    }
    if let Some(origin) = &args.origin {
        config.origin = origin.clone();
    }
    if args.compact {
        config.pretty = false;
    }
    config.validate()?;
    Ok(config)
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Progress bar wrapper for consistent progress reporting.
pub struct ProgressBar {
    inner: Option<indicatif::ProgressBar>,
}

impl ProgressBar {
    /// Create a new progress bar; hidden unless stderr is a terminal.
    pub fn new(total: u64, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let inner = if std::io::stderr().is_terminal() {
            let pb = indicatif::ProgressBar::new(total);
            let style = indicatif::ProgressStyle::default_bar()
                .template("{prefix} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                .progress_chars("=>-");
            pb.set_style(style);
            pb.set_prefix(prefix);
            Some(pb)
        } else {
            None
        };

        Self { inner }
    }

    /// Advance by one, showing `msg`.
    pub fn inc(&self, msg: impl Into<String>) {
        if let Some(pb) = &self.inner {
            pb.set_message(msg.into());
            pb.inc(1);
        }
    }

    /// Finish the progress bar with a message.
    pub fn finish_with_message(&self, msg: String) {
        if let Some(pb) = &self.inner {
            pb.finish_with_message(msg);
        }
    }
}

/// Sweep the fixture directory with a progress bar.
pub fn sweep_with_progress(runner: &ConformanceRunner) -> Result<SweepReport> {
    let paths = runner.snapshot_fixtures()?;
    let progress = ProgressBar::new(paths.len() as u64, "sweep");
    let report = runner.sweep_paths(&paths, |outcome: &FixtureOutcome| {
        let name = outcome
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress.inc(name);
    });
    progress.finish_with_message(report.to_string());
    Ok(report)
}

/// Print `value` as JSON, or run the human-readable printer.
pub fn output_json_or<T>(
    json: bool,
    value: &T,
    human_fn: impl FnOnce() -> std::io::Result<()>,
) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_flags_win() {
        let args = GlobalArgs {
            out_dir: Some(PathBuf::from("/tmp/fixtures")),
            origin: Some("rs".into()),
            compact: true,
            ..Default::default()
        };
        let config = build_config(&args).unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/fixtures")));
        assert_eq!(config.origin, "rs");
        assert!(!config.pretty);
    }

    #[test]
    fn test_build_config_rejects_bad_origin() {
        let args = GlobalArgs {
            origin: Some("rust2".into()),
            ..Default::default()
        };
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_empty_out_dir_disables() {
        let args = GlobalArgs {
            out_dir: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(build_config(&args).unwrap().output_dir.is_none());
    }
}
