#![forbid(unsafe_code)]

//! Core domain types for gostcheck
//!
//! This module defines the fixed vocabularies shared by the compiler and the
//! engine: rule severities, finding severities, finding categories, and the
//! operation table that maps authored check types to runtime operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule severity levels, as authored in a rule definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Blocker,
    Major,
    Minor,
    Info,
}

impl Severity {
    /// All severities, highest first
    pub const ALL: [Severity; 4] = [
        Severity::Blocker,
        Severity::Major,
        Severity::Minor,
        Severity::Info,
    ];

    /// Parses an exact upper-case severity name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BLOCKER" => Some(Severity::Blocker),
            "MAJOR" => Some(Severity::Major),
            "MINOR" => Some(Severity::Minor),
            "INFO" => Some(Severity::Info),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Blocker => "BLOCKER",
            Severity::Major => "MAJOR",
            Severity::Minor => "MINOR",
            Severity::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation severity attached to a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingSeverity {
    High,
    Medium,
    Low,
    NeedReview,
}

impl FindingSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingSeverity::High => "HIGH",
            FindingSeverity::Medium => "MEDIUM",
            FindingSeverity::Low => "LOW",
            FindingSeverity::NeedReview => "NEED_REVIEW",
        }
    }
}

impl From<Severity> for FindingSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Blocker => FindingSeverity::High,
            Severity::Major => FindingSeverity::Medium,
            Severity::Minor => FindingSeverity::Low,
            Severity::Info => FindingSeverity::NeedReview,
        }
    }
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finding category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// Generic standard violation
    Gost,
    Structure,
    Font,
    Layout,
    Heading,
    Abstract,
    Keywords,
    /// Needs a human to confirm
    Review,
    /// The engine itself failed on a rule
    Engine,
    Info,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Gost => "GOST",
            Category::Structure => "STRUCTURE",
            Category::Font => "FONT",
            Category::Layout => "LAYOUT",
            Category::Heading => "HEADING",
            Category::Abstract => "ABSTRACT",
            Category::Keywords => "KEYWORDS",
            Category::Review => "REVIEW",
            Category::Engine => "ENGINE",
            Category::Info => "INFO",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime operation codes
///
/// Serialized as `CHECK_*` identifiers. Every compiled rule carries exactly
/// one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Op {
    // structure
    CheckStructurePresence,
    CheckOptionalElementsAllowed,
    CheckIsFirstPage,
    CheckRequiredFields,
    CheckAbstractComponents,
    CheckTocCompleteness,
    // conditional
    CheckRequiredIf,
    CheckConditionalOptional,
    CheckAllowedAbsence,
    // layout
    CheckNotesAndFootnotes,
    CheckPageFormat,
    CheckMargins,
    CheckHeadingFormat,
    CheckPagination,
    CheckPageNumberHidden,
    // content counts and references
    CheckKeywordCount,
    CheckCitationNumericBrackets,
    CheckFormatReference,
    CheckExternalStandardReference,
    // tables, figures, formulas, appendices
    CheckTableRules,
    CheckFigureRules,
    CheckFormulaRules,
    CheckAppendixRules,
    // human / AI review
    CheckSemanticReview,
}

/// Authored `check.type` → runtime operation
const TYPE_TO_OP: &[(&str, Op)] = &[
    ("structure_presence", Op::CheckStructurePresence),
    ("optional_elements_allowed", Op::CheckOptionalElementsAllowed),
    ("is_first_page", Op::CheckIsFirstPage),
    ("required_fields", Op::CheckRequiredFields),
    ("abstract_components", Op::CheckAbstractComponents),
    ("toc_completeness", Op::CheckTocCompleteness),
    ("required_if", Op::CheckRequiredIf),
    ("conditional_optional", Op::CheckConditionalOptional),
    ("allowed_absence", Op::CheckAllowedAbsence),
    ("notes_and_footnotes", Op::CheckNotesAndFootnotes),
    ("page_format", Op::CheckPageFormat),
    ("margins", Op::CheckMargins),
    ("heading_format", Op::CheckHeadingFormat),
    ("pagination", Op::CheckPagination),
    ("page_number_hidden", Op::CheckPageNumberHidden),
    ("keyword_count", Op::CheckKeywordCount),
    ("citation_numeric_brackets", Op::CheckCitationNumericBrackets),
    ("format_reference", Op::CheckFormatReference),
    ("external_standard_reference", Op::CheckExternalStandardReference),
    ("table_rules", Op::CheckTableRules),
    ("figure_rules", Op::CheckFigureRules),
    ("formula_rules", Op::CheckFormulaRules),
    ("appendix_rules", Op::CheckAppendixRules),
    ("semantic_review", Op::CheckSemanticReview),
];

impl Op {
    /// Resolves an authored check type through the fixed table
    pub fn from_check_type(check_type: &str) -> Option<Op> {
        TYPE_TO_OP
            .iter()
            .find(|(t, _)| *t == check_type)
            .map(|(_, op)| *op)
    }

    /// Returns the authored check type for this operation
    pub fn check_type(&self) -> &'static str {
        TYPE_TO_OP
            .iter()
            .find(|(_, op)| op == self)
            .map(|(t, _)| *t)
            .unwrap_or("unknown")
    }

    /// Returns the serialized `CHECK_*` code
    pub fn code(&self) -> String {
        format!("CHECK_{}", self.check_type().to_uppercase())
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}
