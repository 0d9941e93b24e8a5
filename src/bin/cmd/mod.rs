// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod compare;
mod emit;
mod run;
mod sweep;
mod types;

pub use compare::CompareCmd;
pub use emit::EmitCmd;
pub use run::RunCmd;
pub use sweep::SweepCmd;
pub use types::TypesCmd;
