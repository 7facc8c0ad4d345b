//! Output formatters (human and JSONL)

pub mod human;
pub mod jsonl;

pub use human::HumanFormatter;
pub use jsonl::{JsonlFormatter, parse_findings};

use crate::finding::Finding;
use crate::types::FindingSeverity;
use serde::Serialize;

/// Number of findings per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub need_review: usize,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        findings.iter().fold(Self::default(), |mut counts, f| {
            counts.total += 1;
            match f.severity {
                FindingSeverity::High => counts.high += 1,
                FindingSeverity::Medium => counts.medium += 1,
                FindingSeverity::Low => counts.low += 1,
                FindingSeverity::NeedReview => counts.need_review += 1,
            }
            counts
        })
    }

    /// True when any finding is HIGH
    pub fn has_high(&self) -> bool {
        self.high > 0
    }
}
