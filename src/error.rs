//! Error types for gostcheck
//!
//! This module defines the error types used throughout gostcheck, following
//! a hierarchical structure with specific error variants for each stage:
//! rule compilation, ruleset loading, snapshot building, and per-rule
//! evaluation.

use std::fmt;
use std::path::PathBuf;

/// A `check.type` value that has no entry in the operation table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedCheck {
    /// Index of the rule in the definition's `rules` list
    pub index: usize,
    /// The offending type, or `None` when it was not a string
    pub check_type: Option<String>,
}

impl fmt::Display for UnsupportedCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.check_type {
            Some(t) => write!(f, "rules[{}].check.type = {}", self.index, t),
            None => write!(f, "rules[{}].check.type = <non-string>", self.index),
        }
    }
}

/// Rule definition compilation errors
///
/// Every variant is fatal: compilation either fully succeeds or fully fails.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Invalid definition syntax (TOML or JSON)
    #[error("Invalid definition syntax: {0}")]
    InvalidSyntax(String),

    /// Missing required field
    #[error("Missing required field '{field}' at {location}")]
    MissingField { field: String, location: String },

    /// Field present with the wrong shape
    #[error("Expected {expected} at {location}, got {found}")]
    InvalidType {
        location: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Severity outside the fixed vocabulary
    #[error("Invalid severity at {location}: {value}")]
    InvalidSeverity { location: String, value: String },

    /// A list that must have at least one element is empty
    #[error("{0} is empty")]
    Empty(&'static str),

    /// One or more rules use a check type the engine does not know
    #[error("Unsupported check.type found:\n{}", format_unsupported(.0))]
    UnsupportedCheckTypes(Vec<UnsupportedCheck>),

    /// Two rules share an id
    #[error("Duplicate rule id: {0}")]
    DuplicateRuleId(String),

    /// I/O error reading the definition or writing the output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_unsupported(items: &[UnsupportedCheck]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors loading a compiled runtime ruleset
#[derive(Debug, thiserror::Error)]
pub enum RulesetError {
    /// The file is not valid JSON or does not match the runtime layout
    #[error("Invalid runtime ruleset: {0}")]
    Invalid(String),

    /// `runtime_format` is missing or not the expected discriminator
    #[error("Invalid runtime ruleset: runtime_format mismatch (found {0:?})")]
    FormatMismatch(Option<String>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors building a document snapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The extracted document could not be parsed
    #[error("Failed to parse document {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The document could not be opened
    #[error("Failed to open document {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while evaluating a single rule
///
/// These never abort a batch; the engine turns them into findings.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// A rule argument is present but has the wrong shape
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    /// Any other failure inside a check
    #[error("{0}")]
    Failed(String),
}

impl EvalError {
    /// Convenience constructor for argument errors
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Top-level error type for gostcheck
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    /// Configuration (gostcheck.toml) error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Compile error
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// Runtime ruleset error
    #[error("Ruleset error: {0}")]
    Ruleset(#[from] RulesetError),

    /// Snapshot error
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse error
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantic validation failure
    #[error("{0}")]
    Validation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_lists_every_entry() {
        let err = CompileError::UnsupportedCheckTypes(vec![
            UnsupportedCheck {
                index: 0,
                check_type: Some("foo".to_string()),
            },
            UnsupportedCheck {
                index: 3,
                check_type: None,
            },
        ]);
        let msg = err.to_string();
        assert!(msg.contains("rules[0].check.type = foo"));
        assert!(msg.contains("rules[3].check.type = <non-string>"));
    }

    #[test]
    fn test_missing_field_names_location() {
        let err = CompileError::MissingField {
            field: "code".to_string(),
            location: "standard".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required field 'code' at standard");
    }

    #[test]
    fn test_checker_error_wraps_compile_error() {
        let err: CheckerError = CompileError::DuplicateRuleId("R1".to_string()).into();
        assert!(err.to_string().contains("Duplicate rule id: R1"));
    }
}
