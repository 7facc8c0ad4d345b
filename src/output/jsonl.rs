#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line:
//! 1. One finding record per finding, in engine order
//! 2. One summary record with counts per severity

use crate::finding::Finding;
use crate::output::SeverityCounts;
use serde::Serialize;
use serde_json::Value;

const FINDING_RECORD: &str = "finding";
const SUMMARY_RECORD: &str = "summary";

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Finding records followed by one summary record
    pub fn format(&self, findings: &[Finding]) -> String {
        let mut output = self.format_findings(findings);

        let summary = SummaryRecord {
            record_type: SUMMARY_RECORD,
            counts: SeverityCounts::from_findings(findings),
        };
        if let Ok(json) = serde_json::to_string(&summary) {
            output.push_str(&json);
            output.push('\n');
        }

        output
    }

    /// Finding records only
    pub fn format_findings(&self, findings: &[Finding]) -> String {
        let mut output = String::new();
        for finding in findings {
            let record = FindingRecord {
                record_type: FINDING_RECORD,
                finding,
            };
            if let Ok(json) = serde_json::to_string(&record) {
                output.push_str(&json);
                output.push('\n');
            }
        }
        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Read findings back from JSONL
///
/// Blank lines and records of any other type are skipped; lines without a
/// `type` field are taken as findings.
///
/// # Errors
///
/// Returns the first JSON error, which carries its line and column.
pub fn parse_findings(content: &str) -> Result<Vec<Finding>, serde_json::Error> {
    let mut findings = Vec::new();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        let value: Value = serde_json::from_str(line)?;
        let is_finding = match value.get("type") {
            None => true,
            Some(t) => t.as_str() == Some(FINDING_RECORD),
        };
        if is_finding {
            findings.push(serde_json::from_value(value)?);
        }
    }
    Ok(findings)
}

#[derive(Debug, Serialize)]
struct FindingRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    #[serde(flatten)]
    finding: &'a Finding,
}

#[derive(Debug, Serialize)]
struct SummaryRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    #[serde(flatten)]
    counts: SeverityCounts,
}
