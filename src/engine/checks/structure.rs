#![forbid(unsafe_code)]

//! Presence checks: structural elements and abstract components

use crate::engine::args;
use crate::engine::checks::{ABSTRACT_ANCHOR, CheckContext};
use crate::error::EvalError;
use crate::finding::Finding;
use crate::types::Category;
use std::collections::HashSet;

/// `required_elements`: titles that must each appear as a whole paragraph
///
/// Matching is on the full upper-cased paragraph text, so a numbered
/// heading such as "1 ВВЕДЕНИЕ" does not satisfy "ВВЕДЕНИЕ".
pub fn structure_presence(ctx: &CheckContext<'_>) -> Result<Vec<Finding>, EvalError> {
    let required = args::string_list(ctx.rule, "required_elements")?;
    let present: HashSet<&str> = ctx
        .snapshot
        .paragraphs()
        .iter()
        .map(|p| p.text_upper.as_str())
        .collect();

    let findings = required
        .iter()
        .map(|title| title.trim())
        .filter(|title| !title.is_empty())
        .filter(|title| !present.contains(title.to_uppercase().as_str()))
        .map(|title| {
            let finding = ctx
                .finding(
                    format!("Missing required structural element «{}».", title),
                    format!(
                        "Add the «{}» section with a heading formatted as required.",
                        title
                    ),
                )
                .with_category(Category::Structure);
            ctx.locate(finding, Some(title), None)
        })
        .collect();

    Ok(findings)
}

/// `required`: phrases that must occur somewhere in the document text
///
/// Reports every missing phrase in a single finding.
pub fn abstract_components(ctx: &CheckContext<'_>) -> Result<Vec<Finding>, EvalError> {
    let required = args::string_list(ctx.rule, "required")?;
    let corpus = ctx
        .snapshot
        .paragraphs()
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase();

    let missing: Vec<&str> = required
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty() && !corpus.contains(&item.to_lowercase()))
        .collect();

    if missing.is_empty() {
        return Ok(Vec::new());
    }

    let finding = ctx
        .finding(
            format!(
                "The abstract lacks required components: {}.",
                missing.join(", ")
            ),
            format!(
                "Add the missing components to the «{}» section.",
                ABSTRACT_ANCHOR
            ),
        )
        .with_category(Category::Abstract);
    Ok(vec![ctx.locate(finding, Some(ABSTRACT_ANCHOR), None)])
}
