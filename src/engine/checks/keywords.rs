#![forbid(unsafe_code)]

//! Keyword list size in the abstract

use crate::engine::args;
use crate::engine::checks::{ABSTRACT_ANCHOR, CheckContext};
use crate::error::EvalError;
use crate::finding::Finding;
use crate::types::{Category, FindingSeverity};

/// Lower-case stem that marks the keyword line ("ключевые слова")
pub const KEYWORD_MARKER: &str = "ключев";

pub const DEFAULT_MIN_KEYWORDS: i64 = 5;
pub const DEFAULT_MAX_KEYWORDS: i64 = 15;

/// Counts comma-separated terms after the first colon of the keyword line
///
/// The keyword line is the first paragraph containing [`KEYWORD_MARKER`]
/// and a colon. Without one, a review advisory is returned instead.
pub fn keyword_count(ctx: &CheckContext<'_>) -> Result<Vec<Finding>, EvalError> {
    let min = args::integer(ctx.rule, "min", DEFAULT_MIN_KEYWORDS)?;
    let max = args::integer(ctx.rule, "max", DEFAULT_MAX_KEYWORDS)?;

    let line = ctx
        .snapshot
        .paragraphs()
        .iter()
        .find(|p| p.text.to_lowercase().contains(KEYWORD_MARKER) && p.text.contains(':'));

    let Some(line) = line else {
        let finding = ctx
            .finding(
                "Keyword line not found; cannot verify the number of keywords.",
                format!(
                    "Add a \"Ключевые слова: ...\" line to the «{}» section.",
                    ABSTRACT_ANCHOR
                ),
            )
            .with_severity(FindingSeverity::NeedReview)
            .with_category(Category::Review);
        return Ok(vec![ctx.locate(finding, Some(ABSTRACT_ANCHOR), None)]);
    };

    let terms = line
        .text
        .split_once(':')
        .map(|(_, rest)| rest)
        .unwrap_or_default()
        .split(',')
        .filter(|term| !term.trim().is_empty())
        .count() as i64;

    if (min..=max).contains(&terms) {
        return Ok(Vec::new());
    }

    let finding = ctx
        .finding(
            format!(
                "The abstract lists {} keywords; expected {} to {}.",
                terms, min, max
            ),
            format!("List between {} and {} keywords.", min, max),
        )
        .with_category(Category::Keywords);
    Ok(vec![ctx.locate(finding, None, Some(line.position))])
}
