// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Outcomes of a conformance run.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::compare::JsonDiff;

/// Result of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Fixtures written while running the scenario.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixtures: Vec<PathBuf>,
}

impl ScenarioOutcome {
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            detail: None,
            fixtures: Vec::new(),
        }
    }

    pub fn failed(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            detail: Some(detail.into()),
            fixtures: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_fixtures(mut self, fixtures: Vec<PathBuf>) -> Self {
        self.fixtures = fixtures;
        self
    }
}

/// What happened to one fixture during the sweep.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FixtureStatus {
    /// Re-encoding is equivalent; `written` is the write-back, if any.
    Passed {
        #[serde(skip_serializing_if = "Option::is_none")]
        written: Option<PathBuf>,
    },
    /// Type unknown to this implementation, or payload unreadable.
    Skipped { reason: String },
    /// Re-encoding is not equivalent to the original.
    Mismatch { diffs: Vec<JsonDiff> },
    /// The harness itself failed on this fixture (encode or write-back).
    Failed { error: String },
}

/// Outcome of one fixture.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureOutcome {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Origin tag parsed from the file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(flatten)]
    pub status: FixtureStatus,
}

impl FixtureOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self.status,
            FixtureStatus::Mismatch { .. } | FixtureStatus::Failed { .. }
        )
    }
}

impl fmt::Display for FixtureOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        match &self.status {
            FixtureStatus::Passed { .. } => write!(f, "PASS {name}"),
            FixtureStatus::Skipped { reason } => write!(f, "SKIP {name}: {reason}"),
            FixtureStatus::Mismatch { diffs } => {
                write!(f, "FAIL {name}: {} difference(s)", diffs.len())?;
                for diff in diffs {
                    write!(f, "\n    {diff}")?;
                }
                Ok(())
            }
            FixtureStatus::Failed { error } => write!(f, "FAIL {name}: {error}"),
        }
    }
}

/// Per-fixture outcomes of a sweep.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    pub outcomes: Vec<FixtureOutcome>,
}

impl SweepReport {
    pub fn push(&mut self, outcome: FixtureOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, FixtureStatus::Passed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, FixtureStatus::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// Fixtures written back during the sweep.
    pub fn written(&self) -> Vec<&PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                FixtureStatus::Passed { written } => written.as_ref(),
                _ => None,
            })
            .collect()
    }

    /// Skips never count against conformance.
    pub fn is_conformant(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&FixtureStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fixture(s): {} passed, {} skipped, {} failed",
            self.total(),
            self.passed(),
            self.skipped(),
            self.failed()
        )
    }
}

/// Everything a full run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConformanceReport {
    pub scenarios: Vec<ScenarioOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepReport>,
}

impl ConformanceReport {
    pub fn is_conformant(&self) -> bool {
        self.scenarios.iter().all(|s| s.passed)
            && self.sweep.as_ref().map_or(true, SweepReport::is_conformant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::DiffKind;

    fn outcome(status: FixtureStatus) -> FixtureOutcome {
        FixtureOutcome {
            path: PathBuf::from("/out/Value_go1.json"),
            type_name: Some("Value".into()),
            origin: Some("go".into()),
            status,
        }
    }

    #[test]
    fn test_skips_do_not_fail() {
        let mut report = SweepReport::default();
        report.push(outcome(FixtureStatus::Passed { written: None }));
        report.push(outcome(FixtureStatus::Skipped {
            reason: "unknown".into(),
        }));
        assert!(report.is_conformant());
        assert_eq!((report.passed(), report.skipped(), report.failed()), (1, 1, 0));
    }

    #[test]
    fn test_mismatch_fails() {
        let mut report = SweepReport::default();
        report.push(outcome(FixtureStatus::Mismatch {
            diffs: vec![JsonDiff {
                path: "valueColumns[0]".into(),
                kind: DiffKind::Value,
                expected: Some("a".into()),
                actual: Some("b".into()),
            }],
        }));
        assert!(!report.is_conformant());
        let text = report.outcomes[0].to_string();
        assert!(text.starts_with("FAIL Value_go1.json: 1 difference(s)"));
        assert!(text.contains("valueColumns[0]"));

        let full = ConformanceReport {
            scenarios: vec![ScenarioOutcome::passed("known-examples")],
            sweep: Some(report),
        };
        assert!(!full.is_conformant());
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_value(outcome(FixtureStatus::Skipped {
            reason: "no codec".into(),
        }))
        .unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "no codec");
        assert_eq!(json["type_name"], "Value");
    }

    #[test]
    fn test_failed_scenario() {
        let report = ConformanceReport {
            scenarios: vec![ScenarioOutcome::failed("persistence", "boom")],
            sweep: None,
        };
        assert!(!report.is_conformant());
    }
}
