#![forbid(unsafe_code)]

//! gostcheck: rule-driven formatting checks for GOST reports
//!
//! Authored rule definitions are compiled into an indexed runtime ruleset.
//! A document is reduced to an immutable snapshot, every rule is evaluated
//! against it, and each finding is located by paragraph position, snippet
//! and content hash so it can be found again in a later version.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod finding;
pub mod locator;
pub mod output;
pub mod rules;
pub mod snapshot;
pub mod text;
pub mod types;

// Re-export error types for convenient access
pub use error::{
    CheckerError, CompileError, ConfigError, EvalError, RulesetError, SnapshotError,
};

// Re-export core domain types for convenient access
pub use engine::{ExecutionEngine, run_rule, run_ruleset};
pub use finding::Finding;
pub use locator::{attach_location, locate_anchor, relocalize_all, relocalize_issue};
pub use rules::{RuntimeRule, RuntimeRuleset, compile, compile_file};
pub use snapshot::{DocumentSnapshot, build_snapshot, snapshot_from_path};
pub use types::{Category, FindingSeverity, Op, Severity};
