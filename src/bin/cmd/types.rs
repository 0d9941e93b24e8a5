// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Types command - list registered type names.

use clap::Args;

use cacheconf::global_registry;

use crate::common::{output_json_or, GlobalArgs, Result};

/// List type names the harness can decode.
#[derive(Args, Clone, Debug)]
pub struct TypesCmd {}

impl TypesCmd {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let names = global_registry().type_names();
        output_json_or(global.json, &names, || {
            for name in &names {
                println!("{name}");
            }
            Ok(())
        })
    }
}
