// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixture I/O.
//!
//! - [`naming`] - `<TypeName>_<origin><millis>.<ext>` file names
//! - [`sidecar`] - Explicit type tags stored beside fixtures
//! - [`store`] - Write-once fixture directory

pub mod naming;
pub mod sidecar;
pub mod store;

pub use naming::{derive_type_name, fixture_file_name, is_portable_type_name, FixtureName};
pub use sidecar::{FixtureMeta, SIDECAR_SUFFIX};
pub use store::{FixtureIter, FixturePath, FixtureStore, DEFAULT_EXTENSION, DEFAULT_ORIGIN};
