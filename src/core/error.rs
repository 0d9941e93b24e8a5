// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for cacheconf.
//!
//! Provides error types for the conformance harness:
//! - Schema resolution
//! - Decoding and encoding of message payloads
//! - Fixture store I/O
//! - Scenario assertions

use std::fmt;

/// Errors that can occur while running the conformance harness.
#[derive(Debug, Clone)]
pub enum HarnessError {
    /// No codec is registered for a type name
    SchemaNotFound {
        /// Type name that was not found
        type_name: String,
    },

    /// Payload text could not be decoded as the requested type
    DecodeError {
        /// Type the payload was decoded as
        type_name: String,
        /// Error message
        message: String,
    },

    /// Message could not be encoded
    EncodeError {
        /// Type being encoded
        type_name: String,
        /// Error message
        message: String,
    },

    /// Fixture could not be written
    IoWriteError {
        /// Target path
        path: String,
        /// Error message
        message: String,
    },

    /// Fixture or directory could not be read
    IoReadError {
        /// Source path
        path: String,
        /// Error message
        message: String,
    },

    /// File name does not follow the fixture naming convention
    InvalidFixtureName {
        /// Offending file name
        name: String,
    },

    /// A self-authored scenario check did not hold
    AssertionFailed {
        /// Scenario name
        scenario: String,
        /// What did not hold
        message: String,
    },

    /// Invalid harness configuration
    Config {
        /// Error message
        message: String,
    },

    /// Other error
    Other(String),
}

impl HarnessError {
    /// Create a "schema not found" error.
    pub fn schema_not_found(type_name: impl Into<String>) -> Self {
        HarnessError::SchemaNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        HarnessError::DecodeError {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        HarnessError::EncodeError {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a write error.
    pub fn io_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        HarnessError::IoWriteError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a read error.
    pub fn io_read(path: impl Into<String>, message: impl Into<String>) -> Self {
        HarnessError::IoReadError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid fixture name error.
    pub fn invalid_fixture_name(name: impl Into<String>) -> Self {
        HarnessError::InvalidFixtureName { name: name.into() }
    }

    /// Create an assertion failure for a scenario.
    pub fn assertion(scenario: impl Into<String>, message: impl Into<String>) -> Self {
        HarnessError::AssertionFailed {
            scenario: scenario.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        HarnessError::Config {
            message: message.into(),
        }
    }

    /// Whether the sweep should treat this error as a skip.
    ///
    /// Foreign or malformed fixtures are expected in a shared directory;
    /// only harness-side failures are not skippable.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            HarnessError::SchemaNotFound { .. }
                | HarnessError::DecodeError { .. }
                | HarnessError::IoReadError { .. }
                | HarnessError::InvalidFixtureName { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            HarnessError::SchemaNotFound { type_name } => vec![("type", type_name.clone())],
            HarnessError::DecodeError { type_name, message }
            | HarnessError::EncodeError { type_name, message } => {
                vec![("type", type_name.clone()), ("message", message.clone())]
            }
            HarnessError::IoWriteError { path, message }
            | HarnessError::IoReadError { path, message } => {
                vec![("path", path.clone()), ("message", message.clone())]
            }
            HarnessError::InvalidFixtureName { name } => vec![("name", name.clone())],
            HarnessError::AssertionFailed { scenario, message } => vec![
                ("scenario", scenario.clone()),
                ("message", message.clone()),
            ],
            HarnessError::Config { message } => vec![("message", message.clone())],
            HarnessError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::SchemaNotFound { type_name } => {
                write!(f, "Schema not found: '{type_name}'")
            }
            HarnessError::DecodeError { type_name, message } => {
                write!(f, "Failed to decode '{type_name}': {message}")
            }
            HarnessError::EncodeError { type_name, message } => {
                write!(f, "Failed to encode '{type_name}': {message}")
            }
            HarnessError::IoWriteError { path, message } => {
                write!(f, "Failed to write '{path}': {message}")
            }
            HarnessError::IoReadError { path, message } => {
                write!(f, "Failed to read '{path}': {message}")
            }
            HarnessError::InvalidFixtureName { name } => {
                write!(f, "Invalid fixture name: '{name}'")
            }
            HarnessError::AssertionFailed { scenario, message } => {
                write!(f, "Scenario '{scenario}' failed: {message}")
            }
            HarnessError::Config { message } => write!(f, "Configuration error: {message}"),
            HarnessError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for HarnessError {}

/// Result type for cacheconf operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_not_found_error() {
        let err = HarnessError::schema_not_found("UnknownType");
        assert!(matches!(err, HarnessError::SchemaNotFound { .. }));
        assert_eq!(err.to_string(), "Schema not found: 'UnknownType'");
    }

    #[test]
    fn test_decode_error() {
        let err = HarnessError::decode("EagerCacheRuleSpec", "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "Failed to decode 'EagerCacheRuleSpec': expected value at line 1"
        );
    }

    #[test]
    fn test_io_errors() {
        let err = HarnessError::io_write("/tmp/x.json", "permission denied");
        assert_eq!(
            err.to_string(),
            "Failed to write '/tmp/x.json': permission denied"
        );

        let err = HarnessError::io_read("/tmp/y.json", "not found");
        assert_eq!(err.to_string(), "Failed to read '/tmp/y.json': not found");
    }

    #[test]
    fn test_assertion_error() {
        let err = HarnessError::assertion("known_examples", "reference differs");
        assert_eq!(
            err.to_string(),
            "Scenario 'known_examples' failed: reference differs"
        );
    }

    #[test]
    fn test_skippable_classification() {
        assert!(HarnessError::schema_not_found("X").is_skippable());
        assert!(HarnessError::decode("X", "bad").is_skippable());
        assert!(HarnessError::io_read("p", "gone").is_skippable());
        assert!(HarnessError::invalid_fixture_name("123.json").is_skippable());
        assert!(!HarnessError::io_write("p", "full").is_skippable());
        assert!(!HarnessError::encode("X", "bad").is_skippable());
        assert!(!HarnessError::assertion("s", "m").is_skippable());
    }

    #[test]
    fn test_log_fields() {
        let err = HarnessError::decode("Value", "bad");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("type", "Value".to_string()));
        assert_eq!(fields[1], ("message", "bad".to_string()));

        let err = HarnessError::io_write("out.json", "disk full");
        let fields = err.log_fields();
        assert_eq!(fields[0], ("path", "out.json".to_string()));

        let err = HarnessError::Other("msg".to_string());
        assert_eq!(err.log_fields(), vec![("message", "msg".to_string())]);
    }

    #[test]
    fn test_error_clone() {
        let err1 = HarnessError::config("bad origin");
        let err2 = err1.clone();
        assert_eq!(err1.to_string(), err2.to_string());
        assert_eq!(err1.to_string(), "Configuration error: bad origin");
    }
}
