// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use cacheconf::HarnessConfig;

// ============================================================================
// Temporary fixture directories
// ============================================================================

/// Unique directory under the system temp dir, removed on drop.
pub struct TempFixtureDir {
    path: PathBuf,
}

impl TempFixtureDir {
    /// Create the directory.
    pub fn new(tag: &str) -> Self {
        let path = Self::unique_path(tag);
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    /// Reserve a unique path without creating it.
    pub fn uncreated(tag: &str) -> Self {
        Self {
            path: Self::unique_path(tag),
        }
    }

    fn unique_path(tag: &str) -> PathBuf {
        let random = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let thread_id = format!("{:?}", std::thread::current().id())
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>();
        std::env::temp_dir().join(format!(
            "cacheconf_{tag}_{}_{thread_id}_{random}",
            std::process::id()
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Harness configuration writing into this directory.
    pub fn config(&self) -> HarnessConfig {
        HarnessConfig {
            output_dir: Some(self.path.clone()),
            ..Default::default()
        }
    }

    /// Place a file as another implementation would.
    pub fn put(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// Sorted names of the `.json` files in the directory.
    pub fn json_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.path)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter_map(|e| e.file_name().to_str().map(str::to_string))
                    .filter(|name| name.ends_with(".json"))
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}

impl Drop for TempFixtureDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

// ============================================================================
// Foreign fixtures
// ============================================================================

/// Compact rule as the Go harness writes it (protojson, no whitespace).
pub const GO_EAGER_RULE: &str = r#"{"cacheRef":{"name":"myCache","namespace":"myNamespace"},"tableName":"TABLE_EAGER_RULE_1","key":{"format":"JSON","keySeparator":",","keyColumns":["col1","col3","col4"]},"value":{"valueColumns":["col6","col7","col8"]}}"#;

/// Pretty configuration as the Java harness prints it.
pub const JAVA_CACHE_CONF: &str = r#"{
  "cacheSpec": {
    "deployment": {
      "type": "CLUSTER",
      "replicas": 3,
      "resources": {
        "requests": {
          "memory": "4Gi",
          "cpu": "2"
        }
      }
    },
    "dataSource": {
      "dbType": "MYSQL_8",
      "connectionProperties": {
        "prop1": "value1"
      }
    }
  },
  "lazyCacheRuleSpecs": {
    "lazy": {
      "cacheRef": {
        "name": "myCache",
        "namespace": "myNamespace"
      },
      "query": "select * from t where id='?'"
    }
  }
}"#;
