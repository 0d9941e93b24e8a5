// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # cacheconf
//!
//! Cross-implementation JSON conformance harness for the gingersnap cache
//! configuration messages (`EagerCacheRuleSpec`, `CacheConf`, ...).
//!
//! Independent serializers of the same schema exchange fixtures through a
//! shared directory. This crate checks its own codec against agreed
//! literals, persists its encodings for the others, and sweeps whatever
//! the others left behind.
//!
//! ## Architecture
//!
//! - `schema/` - Message types and the [`Message`] / [`DynMessage`] traits
//! - `encoding/` - Proto3 JSON codec, YAML input, codec registry
//! - `compare` - Typed equality and structural JSON diffs
//! - `io/` - Fixture naming, sidecars and the write-once store
//! - `config` - Layered harness configuration
//! - `runner/` - Conformance scenarios and reports
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), cacheconf::HarnessError> {
//! use cacheconf::{ConformanceRunner, HarnessConfig};
//!
//! let runner = ConformanceRunner::new(&HarnessConfig::default());
//! let report = runner.run_all()?;
//! assert!(report.is_conformant());
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{Format, HarnessError, Result, TypeRegistry};

// Message types
pub mod schema;

pub use schema::{downcast, AnyMessage, DynMessage, Message};

// Encoding/decoding
pub mod encoding;

pub use encoding::{global_registry, CodecRegistry, DynCodec, JsonCodec, JsonLayout};

// Comparison
pub mod compare;

pub use compare::{canonicalize, diff_json, equals, equals_text, DiffKind, JsonDiff};

// Fixture I/O
pub mod io;

pub use io::{FixtureMeta, FixtureName, FixturePath, FixtureStore};

// Configuration
pub mod config;

pub use config::{ConfigError, HarnessConfig};

// Scenarios
pub mod runner;

pub use runner::{ConformanceReport, ConformanceRunner, FixtureOutcome, FixtureStatus, SweepReport};
