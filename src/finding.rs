#![forbid(unsafe_code)]

//! Findings produced by the engine
//!
//! A finding is one violation or advisory. Its location fields are filled
//! opportunistically: a missing-section finding may carry only an anchor,
//! a font finding carries a paragraph position, snippet and content hash.

use crate::rules::RuntimeRule;
use crate::types::{Category, FindingSeverity};
use serde::{Deserialize, Serialize};

/// Page marker used when the format has no fixed pagination
pub const UNKNOWN_PAGE: &str = "?";

fn unknown_page() -> String {
    UNKNOWN_PAGE.to_string()
}

/// One reported rule violation or advisory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: FindingSeverity,
    pub category: Category,
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub clause: Option<String>,
    pub message: String,
    pub suggestion: String,

    /// Canonical heading the finding is attached to
    #[serde(default)]
    pub anchor: Option<String>,
    /// Paragraph position in the snapshot the finding was located against
    #[serde(default)]
    pub para_idx: Option<usize>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub content_hash: Option<String>,
    #[serde(default = "unknown_page")]
    pub page: String,
}

impl Finding {
    /// Creates an unlocated finding not tied to any rule
    pub fn new(
        severity: FindingSeverity,
        category: Category,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            rule_id: None,
            clause: None,
            message: message.into(),
            suggestion: suggestion.into(),
            anchor: None,
            para_idx: None,
            snippet: None,
            content_hash: None,
            page: unknown_page(),
        }
    }

    /// Creates a finding carrying the rule's id, clause and mapped severity
    pub fn for_rule(
        rule: &RuntimeRule,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        let mut finding = Self::new(rule.severity.into(), Category::Gost, message, suggestion);
        finding.rule_id = Some(rule.id.clone());
        finding.clause = rule.clause_text();
        finding
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_severity(mut self, severity: FindingSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// True when the finding points at a concrete paragraph
    pub fn is_located(&self) -> bool {
        self.para_idx.is_some()
    }
}
