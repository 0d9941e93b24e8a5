// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # cacheconf CLI
//!
//! Conformance harness for cache configuration messages.
//!
//! ## Usage
//!
//! ```sh
//! # All scenarios plus a sweep of the shared fixture directory
//! cacheconf --out-dir /shared/fixtures run
//!
//! # Sweep only, without writing anything back
//! cacheconf --out-dir /shared/fixtures sweep --no-write-back
//!
//! # Write the reference messages
//! cacheconf --out-dir /shared/fixtures emit
//!
//! # Compare two payloads of one type
//! cacheconf compare EagerCacheRuleSpec a.json b.json
//!
//! # List known type names
//! cacheconf types
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{CompareCmd, EmitCmd, RunCmd, SweepCmd, TypesCmd};
use common::{init_tracing, GlobalArgs, Result};

/// cacheconf - cross-implementation conformance harness
///
/// Checks this implementation's JSON codec against agreed examples and
/// against fixtures written by other implementations.
#[derive(Parser, Clone)]
#[command(name = "cacheconf")]
#[command(about = "Conformance harness for gingersnap cache configuration messages", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Run every scenario and sweep the fixture directory
    Run(RunCmd),

    /// Decode and re-encode every fixture in the directory
    Sweep(SweepCmd),

    /// Write the reference messages as fixtures
    Emit(EmitCmd),

    /// Compare two payloads of the same type
    Compare(CompareCmd),

    /// List registered type names
    Types(TypesCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match cli.command {
        Commands::Run(cmd) => cmd.run(&cli.global),
        Commands::Sweep(cmd) => cmd.run(&cli.global),
        Commands::Emit(cmd) => cmd.run(&cli.global),
        Commands::Compare(cmd) => cmd.run(&cli.global),
        Commands::Types(cmd) => cmd.run(&cli.global),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
