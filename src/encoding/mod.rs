// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message encoding/decoding implementations.
//!
//! - [`json`] - Proto3 JSON decoding/encoding
//! - [`yaml`] - YAML input, converted to JSON
//! - [`codec`] - Typed and dynamic codec interfaces
//! - [`registry`] - Codec lookup by schema type name

pub mod codec;
pub mod json;
pub mod registry;
pub mod yaml;

pub use codec::{DynCodec, MessageCodec, TypedCodec};
pub use json::{JsonCodec, JsonLayout};
pub use registry::{global_registry, CodecRegistry};
pub use yaml::{yaml_to_json, yaml_to_json_string};
