//! Relocate command implementation
//!
//! Reads findings produced against an older document version and prints
//! them re-resolved against a newer one, as JSONL finding records.

use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS};
use crate::error::CheckerError;
use crate::locator::relocalize_all;
use crate::output::{JsonlFormatter, parse_findings};
use crate::snapshot::snapshot_from_path;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Error type specific to relocate command
#[derive(Debug, thiserror::Error)]
pub(crate) enum RelocateError {
    #[error(transparent)]
    Checker(#[from] CheckerError),

    #[error("Invalid findings file {path}: {source}")]
    Findings {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub fn run_relocate(findings: &Path, document: &Path) -> i32 {
    match run_relocate_inner(findings, document) {
        Ok(output) => match std::io::stdout().lock().write_all(output.as_bytes()) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_relocate_inner(findings_path: &Path, document: &Path) -> Result<String, RelocateError> {
    let content = fs::read_to_string(findings_path).map_err(CheckerError::from)?;
    let findings = parse_findings(&content).map_err(|source| RelocateError::Findings {
        path: findings_path.display().to_string(),
        source,
    })?;
    let snapshot = snapshot_from_path(document).map_err(CheckerError::from)?;

    let relocated = relocalize_all(&snapshot, &findings);
    let moved = relocated
        .iter()
        .zip(&findings)
        .filter(|(new, old)| new.para_idx != old.para_idx)
        .count();
    tracing::info!(findings = findings.len(), moved, "relocated findings");

    Ok(JsonlFormatter::new().format_findings(&relocated))
}
