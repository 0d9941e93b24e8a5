// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual cacheconf binary and verify its behavior.

mod common;

use std::{
    path::PathBuf,
    process::{Command, Output},
};

use common::{TempFixtureDir, GO_EAGER_RULE};

/// Get the path to the built cacheconf binary
fn cacheconf_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    // The test binary is in target/debug/deps/
    // The cacheconf binary is in target/debug/
    path.pop(); // deps
    path.pop(); // debug or release
    path.push("cacheconf");
    path
}

/// Run cacheconf with arguments, without inheriting an output directory
fn run(args: &[&str]) -> Output {
    let bin = cacheconf_bin();
    Command::new(&bin)
        .args(args)
        .env_remove("rustOutPath")
        .env_remove("CACHECONF_ORIGIN")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run cacheconf and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run cacheconf and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("Conformance harness"));
    for command in ["run", "sweep", "emit", "compare", "types"] {
        assert!(output.contains(command), "help should mention {command}");
    }
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains("cacheconf"));
}

#[test]
fn test_cli_unknown_command() {
    run_err(&["convert"]);
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_types_json() {
    let output = run_ok(&["types", "--json"]);
    let names: Vec<String> = serde_json::from_str(&output).unwrap();
    assert_eq!(names.len(), 11);
    assert!(names.contains(&"EagerCacheRuleSpec".to_string()));
}

#[test]
fn test_run_without_output_dir() {
    let output = run_ok(&["run"]);
    assert!(output.contains("PASS known-examples"));
    assert!(output.contains("persistence disabled"));
}

#[test]
fn test_run_writes_and_sweeps() {
    let dir = TempFixtureDir::new("cli_run");
    let out = dir.path().to_str().unwrap();

    let output = run_ok(&["--out-dir", out, "--origin", "cli", "run", "--json"]);
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["scenarios"].as_array().unwrap().len(), 3);
    assert_eq!(report["sweep"]["outcomes"].as_array().unwrap().len(), 5);
    assert!(dir.json_files().iter().all(|name| name.contains("_cli")));
}

#[test]
fn test_sweep_requires_output_dir() {
    let stderr = run_err(&["sweep"]);
    assert!(stderr.contains("rustOutPath"));
}

#[test]
fn test_sweep_no_write_back() {
    let dir = TempFixtureDir::new("cli_sweep");
    dir.put("EagerCacheRuleSpec_go1699999999999.json", GO_EAGER_RULE);
    dir.put("Unknown_go1699999999999.json", "{}");

    let output = run_ok(&["--out-dir", dir.path().to_str().unwrap(), "sweep", "--no-write-back"]);
    assert!(output.contains("PASS EagerCacheRuleSpec_go1699999999999.json"));
    assert!(output.contains("SKIP Unknown_go1699999999999.json"));
    assert_eq!(dir.json_files().len(), 2);
}

#[test]
fn test_emit() {
    let dir = TempFixtureDir::new("cli_emit");
    let output = run_ok(&["--out-dir", dir.path().to_str().unwrap(), "--compact", "emit"]);
    assert!(output.contains("EagerCacheRuleSpec ->"));
    assert!(output.contains("CacheConf ->"));
    assert_eq!(dir.json_files().len(), 2);
}

#[test]
fn test_compare_equal_and_different() {
    let dir = TempFixtureDir::new("cli_compare");
    let a = dir.put("a.json", GO_EAGER_RULE);
    let b = dir.put("b.json", &GO_EAGER_RULE.replace("TABLE_EAGER_RULE_1", "OTHER"));
    let c = dir.put(
        "c.yaml",
        "tableName: TABLE_EAGER_RULE_1\ncacheRef:\n  name: myCache\n  namespace: myNamespace\nkey:\n  format: JSON\n  keySeparator: ','\n  keyColumns: [col1, col3, col4]\nvalue:\n  valueColumns: [col6, col7, col8]\n",
    );
    let (a, b, c) = (a.to_str().unwrap(), b.to_str().unwrap(), c.to_str().unwrap());

    let output = run_ok(&["compare", "EagerCacheRuleSpec", a, c]);
    assert!(output.contains("equal"));

    let output = run(&["compare", "EagerCacheRuleSpec", a, b, "--json"]);
    assert!(!output.status.success());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["equal"], false);
    assert_eq!(result["diffs"][0]["path"], "tableName");
}

#[test]
fn test_invalid_origin_rejected() {
    let stderr = run_err(&["--origin", "bad_tag", "run"]);
    assert!(stderr.contains("origin"));
}
