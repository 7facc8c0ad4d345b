#![forbid(unsafe_code)]

//! Formatting of structural-element headings

use crate::engine::args;
use crate::engine::checks::CheckContext;
use crate::error::EvalError;
use crate::finding::Finding;
use crate::snapshot::{Alignment, Paragraph};
use crate::types::{Category, FindingSeverity, Severity};
use std::collections::HashSet;

/// Structural element titles checked when the rule lists none
pub const DEFAULT_STRUCTURAL_TITLES: [&str; 8] = [
    "ТИТУЛЬНЫЙ ЛИСТ",
    "РЕФЕРАТ",
    "СОДЕРЖАНИЕ",
    "ВВЕДЕНИЕ",
    "ОСНОВНАЯ ЧАСТЬ",
    "ЗАКЛЮЧЕНИЕ",
    "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ",
    "ПРИЛОЖЕНИЯ",
];

#[derive(Debug, Clone, Copy)]
struct HeadingRequirements {
    uppercase: bool,
    centered: bool,
    no_trailing_period: bool,
    start_new_page: bool,
}

impl HeadingRequirements {
    /// Names of the formatting requirements `p` violates
    fn violations(&self, p: &Paragraph) -> Vec<&'static str> {
        let mut failed = Vec::new();
        if self.uppercase && !p.is_upper {
            failed.push("uppercase");
        }
        if self.centered && p.alignment != Some(Alignment::Center) {
            failed.push("centered");
        }
        if self.no_trailing_period && p.text.ends_with('.') {
            failed.push("no trailing period");
        }
        failed
    }
}

/// Checks the first paragraph whose upper-cased text is a structural title
///
/// Flags: `uppercase`, `centered`, `no_trailing_period`, `start_new_page`.
/// `titles` overrides [`DEFAULT_STRUCTURAL_TITLES`]. Only one heading is
/// inspected per run. A formatting failure is always MAJOR, whatever the
/// rule's own severity.
pub fn heading_format(ctx: &CheckContext<'_>) -> Result<Vec<Finding>, EvalError> {
    let required = HeadingRequirements {
        uppercase: args::flag(ctx.rule, "uppercase"),
        centered: args::flag(ctx.rule, "centered"),
        no_trailing_period: args::flag(ctx.rule, "no_trailing_period"),
        start_new_page: args::flag(ctx.rule, "start_new_page"),
    };

    let configured = args::string_list(ctx.rule, "titles")?;
    let titles: HashSet<String> = if configured.is_empty() {
        DEFAULT_STRUCTURAL_TITLES.iter().map(|t| t.to_string()).collect()
    } else {
        configured.iter().map(|t| t.trim().to_uppercase()).collect()
    };

    let Some(heading) = ctx
        .snapshot
        .paragraphs()
        .iter()
        .find(|p| titles.contains(&p.text_upper))
    else {
        return Ok(Vec::new());
    };

    let mut findings = Vec::new();

    let failed = required.violations(heading);
    if !failed.is_empty() {
        let finding = ctx
            .finding(
                format!(
                    "Heading «{}» is formatted incorrectly (required: {}).",
                    heading.text,
                    failed.join(", ")
                ),
                "Format structural element headings as required: upper case, centered, no trailing period.",
            )
            .with_severity(Severity::Major.into())
            .with_category(Category::Heading);
        findings.push(ctx.locate(finding, Some(heading.text.as_str()), Some(heading.position)));
    }

    if required.start_new_page {
        let finding = ctx
            .finding(
                format!(
                    "Check that the structural element «{}» starts on a new page.",
                    heading.text
                ),
                "Insert a page break before each structural element.",
            )
            .with_severity(FindingSeverity::NeedReview)
            .with_category(Category::Heading);
        findings.push(ctx.locate(finding, Some(heading.text.as_str()), Some(heading.position)));
    }

    Ok(findings)
}
