// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON codec module.
//!
//! Provides proto3 JSON decoding and encoding support.

pub mod codec;

pub use codec::{JsonCodec, JsonLayout};
