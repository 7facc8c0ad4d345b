//! Snapshot command implementation

use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS};
use crate::error::CheckerError;
use crate::snapshot::snapshot_from_path;
use std::path::Path;

/// Print the document snapshot as pretty JSON on stdout
pub fn run_snapshot(document: &Path) -> i32 {
    match run_snapshot_inner(document) {
        Ok(json) => {
            println!("{}", json);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_snapshot_inner(document: &Path) -> Result<String, CheckerError> {
    let snapshot = snapshot_from_path(document)?;
    tracing::info!(
        paragraphs = snapshot.len(),
        anchors = snapshot.anchor_map().len(),
        "snapshot built"
    );
    serde_json::to_string_pretty(&snapshot).map_err(|e| CheckerError::Io(e.into()))
}
