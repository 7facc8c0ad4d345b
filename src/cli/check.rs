//! Check command implementation
//!
//! This module implements the `gostcheck check` command, which:
//! - Loads settings from gostcheck.toml, if present
//! - Loads or compiles the ruleset
//! - Builds the document snapshot
//! - Runs every rule and prints findings (human or JSONL)
//! - Returns an exit code reflecting HIGH findings

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_ERROR, EXIT_PARSE_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS, load_config, load_ruleset,
    resolve_color, resolve_format,
};
use crate::engine::ExecutionEngine;
use crate::error::{CheckerError, CompileError, ConfigError};
use crate::finding::Finding;
use crate::output::{HumanFormatter, JsonlFormatter, SeverityCounts};
use crate::snapshot::snapshot_from_path;
use std::io::Write;
use std::path::{Path, PathBuf};
use termcolor::StandardStream;

/// Error type specific to check command
#[derive(Debug, thiserror::Error)]
pub(crate) enum CheckError {
    #[error(transparent)]
    Checker(#[from] CheckerError),

    #[error("No ruleset given. Pass --ruleset or set checker.ruleset in gostcheck.toml.")]
    NoRuleset,
}

impl From<ConfigError> for CheckError {
    fn from(e: ConfigError) -> Self {
        CheckError::Checker(e.into())
    }
}

impl From<std::io::Error> for CheckError {
    fn from(e: std::io::Error) -> Self {
        CheckError::Checker(e.into())
    }
}

impl From<crate::error::SnapshotError> for CheckError {
    fn from(e: crate::error::SnapshotError) -> Self {
        CheckError::Checker(e.into())
    }
}

/// Run the check command
///
/// Exit code:
/// - 0: no HIGH finding
/// - 1: at least one HIGH finding
/// - 2: error (I/O, unreadable ruleset or document)
/// - 3: invalid settings file or rule definition
pub fn run_check(
    document: &Path,
    ruleset: Option<&Path>,
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> i32 {
    match run_check_inner(document, ruleset, format, color) {
        Ok(counts) => {
            if counts.has_high() {
                EXIT_VIOLATIONS
            } else {
                EXIT_SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                CheckError::Checker(CheckerError::Config(ConfigError::Parse(_)))
                | CheckError::Checker(CheckerError::Config(ConfigError::Validation(_))) => {
                    EXIT_PARSE_ERROR
                }
                CheckError::Checker(CheckerError::Compile(CompileError::Io(_))) => EXIT_ERROR,
                CheckError::Checker(CheckerError::Compile(_)) => EXIT_PARSE_ERROR,
                _ => EXIT_ERROR,
            }
        }
    }
}

fn run_check_inner(
    document: &Path,
    ruleset: Option<&Path>,
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> Result<SeverityCounts, CheckError> {
    let config = load_config()?;

    let ruleset_path: PathBuf = ruleset
        .map(Path::to_path_buf)
        .or_else(|| config.checker.ruleset.clone())
        .ok_or(CheckError::NoRuleset)?;
    let ruleset = load_ruleset(&ruleset_path)?;
    let snapshot = snapshot_from_path(document)?;

    let format = resolve_format(format, &config);
    if format == OutputFormat::Human {
        eprintln!(
            "Checking {} paragraphs with {} rules ({})...",
            snapshot.len(),
            ruleset.len(),
            ruleset.standard().code
        );
    }

    let engine = ExecutionEngine::new();
    let findings = engine.run_ruleset(&snapshot, &ruleset);

    match format {
        OutputFormat::Human => print_human_output(&findings, resolve_color(color, &config))?,
        OutputFormat::Jsonl => print_jsonl_output(&findings)?,
    }

    Ok(SeverityCounts::from_findings(&findings))
}

fn print_human_output(findings: &[Finding], color: termcolor::ColorChoice) -> std::io::Result<()> {
    let mut stdout = StandardStream::stdout(color);
    HumanFormatter::new().write(&mut stdout, findings)
}

fn print_jsonl_output(findings: &[Finding]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(JsonlFormatter::new().format(findings).as_bytes())
}
