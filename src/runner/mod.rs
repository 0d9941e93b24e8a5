// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Conformance scenarios.
//!
//! 1. **Known examples**: the reference rule built in code equals its
//!    agreed literal, and differs from a second literal.
//! 2. **Persistence**: reference messages written twice land in two
//!    distinct, readable fixtures that decode back to the reference.
//! 3. **YAML round trip**: a configuration authored as YAML survives
//!    decode and re-encode structurally intact.
//! 4. **Fixture sweep**: every fixture in the shared directory, whoever
//!    wrote it, decodes and re-encodes to an equivalent payload.
//!
//! Scenarios 1-3 fail the run on the first broken check. The sweep records
//! an outcome per fixture and never stops early.

pub mod reference;
pub mod report;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::compare::{diff_json, diff_json_text, equals, equals_text};
use crate::config::HarnessConfig;
use crate::core::{HarnessError, Result};
use crate::encoding::{yaml_to_json, CodecRegistry};
use crate::io::{FixtureName, FixtureStore};
use crate::schema::{AnyMessage, DynMessage, Message};

pub use reference::{
    different_eager_rule, reference_cache_conf, reference_eager_rule, CACHE_CONF_YAML,
    ERULE_1_JSON, ERULE_2_JSON,
};
pub use report::{ConformanceReport, FixtureOutcome, FixtureStatus, ScenarioOutcome, SweepReport};

pub const KNOWN_EXAMPLES: &str = "known-examples";
pub const PERSISTENCE: &str = "persistence";
pub const YAML_ROUND_TRIP: &str = "yaml-round-trip";

fn ensure(condition: bool, scenario: &str, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(HarnessError::assertion(scenario, message()))
    }
}

/// Runs the conformance scenarios against one registry and fixture store.
pub struct ConformanceRunner {
    registry: CodecRegistry,
    store: FixtureStore,
    write_back: bool,
}

impl ConformanceRunner {
    /// Runner with the built-in types, configured from `config`.
    pub fn new(config: &HarnessConfig) -> Self {
        Self::with_registry(
            CodecRegistry::with_builtin_types_layout(config.json_layout()),
            config,
        )
    }

    /// Runner over a caller-supplied registry.
    pub fn with_registry(registry: CodecRegistry, config: &HarnessConfig) -> Self {
        Self {
            registry,
            store: config.fixture_store(),
            write_back: config.write_back,
        }
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    pub fn store(&self) -> &FixtureStore {
        &self.store
    }

    /// Run every scenario, then the sweep.
    pub fn run_all(&self) -> Result<ConformanceReport> {
        let mut report = ConformanceReport {
            scenarios: self.run_scenarios(),
            sweep: None,
        };
        report.sweep = Some(self.sweep()?);
        info!(conformant = report.is_conformant(), "conformance run finished");
        Ok(report)
    }

    /// Run the known-example, persistence and YAML scenarios.
    ///
    /// A failing scenario is recorded and does not prevent the others.
    pub fn run_scenarios(&self) -> Vec<ScenarioOutcome> {
        let scenarios: [(&str, fn(&Self) -> Result<ScenarioOutcome>); 3] = [
            (KNOWN_EXAMPLES, Self::check_known_examples),
            (PERSISTENCE, Self::check_persistence),
            (YAML_ROUND_TRIP, Self::check_yaml_round_trip),
        ];
        scenarios
            .into_iter()
            .map(|(name, scenario)| {
                scenario(self).unwrap_or_else(|e| {
                    warn!(scenario = name, error = %e, "scenario failed");
                    ScenarioOutcome::failed(name, e.to_string())
                })
            })
            .collect()
    }

    /// Compare the reference rule with the agreed literals.
    pub fn check_known_examples(&self) -> Result<ScenarioOutcome> {
        let type_name = crate::schema::EagerCacheRuleSpec::TYPE_NAME;
        let codec = self.registry.resolve_codec(type_name)?;
        let reference = reference_eager_rule();

        let decoded = codec.decode_dynamic(ERULE_1_JSON)?;
        ensure(equals(&reference, decoded.as_ref()), KNOWN_EXAMPLES, || {
            format!("reference rule differs from its literal: {decoded:?}")
        })?;

        let other = codec.decode_dynamic(ERULE_2_JSON)?;
        ensure(!equals(&reference, other.as_ref()), KNOWN_EXAMPLES, || {
            "a different rule compared equal to the reference".to_string()
        })?;

        let again = codec.decode_dynamic(ERULE_1_JSON)?;
        ensure(equals(decoded.as_ref(), again.as_ref()), KNOWN_EXAMPLES, || {
            "decoding the same text twice gave different messages".to_string()
        })?;

        let encoded = codec.encode_dynamic(&reference)?;
        ensure(
            equals_text(&self.registry, &encoded, ERULE_1_JSON, type_name)?,
            KNOWN_EXAMPLES,
            || format!("encoding of the reference is not equivalent to its literal:\n{encoded}"),
        )?;

        info!(scenario = KNOWN_EXAMPLES, "passed");
        Ok(ScenarioOutcome::passed(KNOWN_EXAMPLES))
    }

    /// Write each reference message twice and read both fixtures back.
    pub fn check_persistence(&self) -> Result<ScenarioOutcome> {
        if !self.store.is_enabled() {
            info!(scenario = PERSISTENCE, "output directory not set, nothing persisted");
            return Ok(ScenarioOutcome::passed(PERSISTENCE).with_detail("persistence disabled"));
        }

        let references: Vec<AnyMessage> = vec![
            Box::new(reference_eager_rule()),
            Box::new(reference_cache_conf()),
        ];
        let mut written = Vec::new();

        for reference in &references {
            let type_name = reference.type_name();
            let codec = self.registry.resolve_codec(type_name)?;
            let payload = codec.encode_dynamic(reference.as_ref())?;

            let first = self.write_required(type_name, &payload)?;
            let second = self.write_required(type_name, &payload)?;
            ensure(first != second, PERSISTENCE, || {
                format!("two writes of '{type_name}' share the path {}", first.display())
            })?;

            for path in [&first, &second] {
                let decoded = codec.decode_dynamic(&self.store.read(path)?)?;
                ensure(equals(reference.as_ref(), decoded.as_ref()), PERSISTENCE, || {
                    format!("{} does not decode to the reference", path.display())
                })?;
            }
            written.push(first);
            written.push(second);
        }

        info!(scenario = PERSISTENCE, fixtures = written.len(), "passed");
        Ok(ScenarioOutcome::passed(PERSISTENCE).with_fixtures(written))
    }

    fn write_required(&self, type_name: &str, payload: &str) -> Result<PathBuf> {
        self.store.write(type_name, payload)?.ok_or_else(|| {
            HarnessError::assertion(PERSISTENCE, "enabled store did not write a fixture")
        })
    }

    /// Decode the YAML configuration, re-encode it and compare structurally.
    pub fn check_yaml_round_trip(&self) -> Result<ScenarioOutcome> {
        let type_name = crate::schema::CacheConf::TYPE_NAME;
        let codec = self.registry.resolve_codec(type_name)?;

        let source = yaml_to_json(CACHE_CONF_YAML)?;
        let source_text = serde_json::to_string(&source)
            .map_err(|e| HarnessError::encode(type_name, format!("{e}")))?;
        let conf = codec.decode_dynamic(&source_text)?;
        ensure(equals(&reference_cache_conf(), conf.as_ref()), YAML_ROUND_TRIP, || {
            "YAML configuration does not decode to the reference".to_string()
        })?;

        let encoded = codec.encode_dynamic(conf.as_ref())?;
        let reparsed: serde_json::Value = serde_json::from_str(&encoded)
            .map_err(|e| HarnessError::decode(type_name, format!("{e}")))?;
        let diffs = diff_json(&source, &reparsed);
        ensure(diffs.is_empty(), YAML_ROUND_TRIP, || {
            let lines: Vec<String> = diffs.iter().map(ToString::to_string).collect();
            format!("re-encoding differs from the YAML source:\n{}", lines.join("\n"))
        })?;

        let fixtures: Vec<PathBuf> = self.store.write(type_name, &encoded)?.into_iter().collect();
        info!(scenario = YAML_ROUND_TRIP, "passed");
        Ok(ScenarioOutcome::passed(YAML_ROUND_TRIP).with_fixtures(fixtures))
    }

    /// Snapshot of the fixtures currently in the store.
    ///
    /// Directory entries that cannot be read are logged and left out.
    pub fn snapshot_fixtures(&self) -> Result<Vec<PathBuf>> {
        Ok(readable_entries(self.store.list(self.store.extension())?))
    }

    /// Sweep the current snapshot of the fixture directory.
    pub fn sweep(&self) -> Result<SweepReport> {
        let paths = self.snapshot_fixtures()?;
        Ok(self.sweep_paths(&paths, |_| {}))
    }

    /// Sweep `paths`, calling `on_fixture` after each one.
    pub fn sweep_paths<F>(&self, paths: &[PathBuf], mut on_fixture: F) -> SweepReport
    where
        F: FnMut(&FixtureOutcome),
    {
        let mut report = SweepReport::default();
        for path in paths {
            let outcome = self.check_fixture(path);
            match &outcome.status {
                FixtureStatus::Passed { .. } => debug!(path = %path.display(), "fixture passed"),
                FixtureStatus::Skipped { reason } => {
                    warn!(path = %path.display(), reason = %reason, "fixture skipped")
                }
                FixtureStatus::Mismatch { diffs } => {
                    warn!(path = %path.display(), diffs = diffs.len(), "fixture mismatch")
                }
                FixtureStatus::Failed { error } => {
                    warn!(path = %path.display(), error = %error, "fixture failed")
                }
            }
            on_fixture(&outcome);
            report.push(outcome);
        }
        info!(
            total = report.total(),
            passed = report.passed(),
            skipped = report.skipped(),
            failed = report.failed(),
            "sweep finished"
        );
        report
    }

    /// Decode, re-encode and compare one fixture.
    pub fn check_fixture(&self, path: &Path) -> FixtureOutcome {
        let origin = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(FixtureName::parse)
            .map(|name| name.origin);
        let (type_name, result) = match self.store.type_name_of(path) {
            Ok(type_name) => {
                let result = self.round_trip_fixture(path, &type_name);
                (Some(type_name), result)
            }
            Err(e) => (None, Err(e)),
        };

        let status = match result {
            Ok(status) => status,
            Err(e) if e.is_skippable() => FixtureStatus::Skipped {
                reason: e.to_string(),
            },
            Err(e) => FixtureStatus::Failed {
                error: e.to_string(),
            },
        };

        FixtureOutcome {
            path: path.to_path_buf(),
            type_name,
            origin,
            status,
        }
    }

    fn round_trip_fixture(&self, path: &Path, type_name: &str) -> Result<FixtureStatus> {
        let codec = self.registry.resolve_codec(type_name)?;
        let original = self.store.read(path)?;

        let message = codec.decode_dynamic(&original)?;
        let reencoded = codec.encode_dynamic(message.as_ref())?;

        if !equals_text(&self.registry, &original, &reencoded, type_name)? {
            let diffs = diff_json_text(&original, &reencoded)?;
            return Ok(FixtureStatus::Mismatch { diffs });
        }

        let written = if self.write_back {
            self.store.write_derived(type_name, &reencoded, path)?
        } else {
            None
        };
        Ok(FixtureStatus::Passed { written })
    }

    /// Encode a message with the registered codec of its type.
    pub fn encode(&self, message: &dyn DynMessage) -> Result<String> {
        self.registry
            .resolve_codec(message.type_name())?
            .encode_dynamic(message)
    }
}

fn readable_entries(entries: impl Iterator<Item = Result<PathBuf>>) -> Vec<PathBuf> {
    entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .collect()
}
