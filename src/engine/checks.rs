#![forbid(unsafe_code)]

//! Built-in checks
//!
//! Each check is a pure function of one snapshot and one rule. Checks never
//! see the rest of the ruleset and never mutate the snapshot; location data
//! is attached through [`CheckContext::locate`].

pub mod heading;
pub mod keywords;
pub mod layout;
pub mod structure;

use crate::finding::Finding;
use crate::locator::attach_location;
use crate::rules::RuntimeRule;
use crate::snapshot::{DocumentSnapshot, Paragraph};
use crate::types::{Category, FindingSeverity};

/// Paragraphs scanned by the per-paragraph checks
pub const MAX_SCANNED_PARAGRAPHS: usize = 500;

/// Anchor for findings about the document as a whole
pub const DOCUMENT_ANCHOR: &str = "DOCUMENT";

/// Heading of the abstract section
pub const ABSTRACT_ANCHOR: &str = "РЕФЕРАТ";

/// Inputs to one check evaluation
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub snapshot: &'a DocumentSnapshot,
    pub rule: &'a RuntimeRule,
}

impl<'a> CheckContext<'a> {
    pub fn new(snapshot: &'a DocumentSnapshot, rule: &'a RuntimeRule) -> Self {
        Self { snapshot, rule }
    }

    /// A finding for this rule, with its clause and mapped severity
    pub fn finding(&self, message: impl Into<String>, suggestion: impl Into<String>) -> Finding {
        Finding::for_rule(self.rule, message, suggestion)
    }

    /// Attach location data against this context's snapshot
    pub fn locate(&self, finding: Finding, anchor: Option<&str>, para_idx: Option<usize>) -> Finding {
        attach_location(self.snapshot, &finding, anchor, para_idx)
    }

    /// The leading paragraphs per-paragraph checks look at
    pub fn scanned_paragraphs(&self) -> impl Iterator<Item = &'a Paragraph> {
        self.snapshot
            .paragraphs()
            .iter()
            .take(MAX_SCANNED_PARAGRAPHS)
    }
}

/// Advisory for a recognized operation that has no automatic check
pub fn manual_review(ctx: &CheckContext<'_>) -> Finding {
    let rule = ctx.rule;
    ctx.finding(
        format!(
            "Rule {} ({}) is not checked automatically and needs manual review.",
            rule.id,
            rule.op.code()
        ),
        "Review this requirement by hand or extend the automatic checks.",
    )
    .with_severity(FindingSeverity::NeedReview)
    .with_category(Category::Review)
}
