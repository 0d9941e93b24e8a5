// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! YAML input support.
//!
//! Configuration is often authored as YAML. It is converted to a JSON value
//! first and then decoded through the regular JSON path, so both inputs
//! follow the same field rules.

use crate::core::{HarnessError, Result};

/// Convert a YAML document into a JSON value.
///
/// Mapping keys must be strings; YAML tags and non-finite floats are
/// rejected.
pub fn yaml_to_json(yaml: &str) -> Result<serde_json::Value> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(yaml).map_err(|e| HarnessError::decode("yaml", format!("{e}")))?;
    serde_json::to_value(&value).map_err(|e| HarnessError::decode("yaml", format!("{e}")))
}

/// Convert a YAML document into JSON text.
pub fn yaml_to_json_string(yaml: &str) -> Result<String> {
    let value = yaml_to_json(yaml)?;
    serde_json::to_string(&value).map_err(|e| HarnessError::encode("yaml", format!("{e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_to_json_nested() {
        let yaml = r#"
cacheRef:
  name: myCache
  namespace: myNamespace
key:
  keySeparator: ','
  keyColumns:
    - col2
    - col3
"#;
        let json = yaml_to_json(yaml).unwrap();
        assert_eq!(json["cacheRef"]["name"], "myCache");
        assert_eq!(json["key"]["keySeparator"], ",");
        assert_eq!(json["key"]["keyColumns"][1], "col3");
    }

    #[test]
    fn test_quoted_scalars_stay_strings() {
        let json = yaml_to_json("memory: \"4Gi\"\ncpu: \"2\"\nreplicas: 2\n").unwrap();
        assert_eq!(json["cpu"], "2");
        assert_eq!(json["replicas"], 2);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = yaml_to_json("key: [unclosed").unwrap_err();
        assert!(matches!(err, HarnessError::DecodeError { .. }));
    }

    #[test]
    fn test_yaml_to_json_string() {
        assert_eq!(yaml_to_json_string("a: 1\n").unwrap(), r#"{"a":1}"#);
    }
}
