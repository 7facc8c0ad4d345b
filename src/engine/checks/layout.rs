#![forbid(unsafe_code)]

//! Page layout checks: font size, line spacing and margins

use crate::engine::args;
use crate::engine::checks::{CheckContext, DOCUMENT_ANCHOR};
use crate::error::EvalError;
use crate::finding::Finding;
use crate::snapshot::MarginEdge;
use crate::types::Category;

/// Allowed deviation from the required line spacing
pub const LINE_SPACING_TOLERANCE: f64 = 0.2;

/// Margin tolerance used when the rule gives none
pub const DEFAULT_MARGIN_TOLERANCE_MM: f64 = 1.0;

/// `min_font_size_pt` and `line_spacing`, each reported at most once
///
/// Both limits are optional. An unusable value disables that half of the
/// check rather than failing the rule.
pub fn page_format(ctx: &CheckContext<'_>) -> Result<Vec<Finding>, EvalError> {
    let mut findings = Vec::new();

    if let Some(min_size) = args::lenient_number(ctx.rule, "min_font_size_pt")
        && let Some((p, size)) = ctx
            .scanned_paragraphs()
            .find_map(|p| p.font_size_pt.filter(|s| *s < min_size).map(|s| (p, s)))
    {
        let finding = ctx
            .finding(
                format!(
                    "Font size {} pt is below the required minimum of {} pt.",
                    size, min_size
                ),
                format!("Set the body text to at least {} pt.", min_size),
            )
            .with_category(Category::Font);
        findings.push(ctx.locate(finding, None, Some(p.position)));
    }

    if let Some(required) = args::lenient_number(ctx.rule, "line_spacing")
        && let Some((p, spacing)) = ctx.scanned_paragraphs().find_map(|p| {
            p.line_spacing
                .filter(|s| (s - required).abs() > LINE_SPACING_TOLERANCE)
                .map(|s| (p, s))
        })
    {
        let finding = ctx
            .finding(
                format!(
                    "Line spacing {} differs from the required {}.",
                    spacing, required
                ),
                format!("Set paragraph line spacing to {}.", required),
            )
            .with_category(Category::Review);
        findings.push(ctx.locate(finding, None, Some(p.position)));
    }

    Ok(findings)
}

/// `left_mm`, `right_mm`, `top_mm`, `bottom_mm` against the primary section
///
/// An edge is reported only when it deviates by strictly more than
/// `tolerance_mm`. Nothing is reported when the document has no measured
/// margins.
pub fn margins(ctx: &CheckContext<'_>) -> Result<Vec<Finding>, EvalError> {
    let tolerance = args::number(ctx.rule, "tolerance_mm")?.unwrap_or(DEFAULT_MARGIN_TOLERANCE_MM);
    let Some(measured) = ctx.snapshot.margins() else {
        tracing::debug!(rule = %ctx.rule.id, "no measured margins, skipping");
        return Ok(Vec::new());
    };

    let findings = MarginEdge::ALL
        .iter()
        .filter_map(|&edge| {
            let target = args::lenient_number(ctx.rule, edge.key())?;
            let actual = measured.edge(edge);
            ((actual - target).abs() > tolerance).then(|| {
                let finding = ctx
                    .finding(
                        format!(
                            "The {} margin is {} mm, expected {} mm (±{} mm).",
                            edge, actual, target, tolerance
                        ),
                        format!("Set the {} margin to {} mm.", edge, target),
                    )
                    .with_category(Category::Layout);
                ctx.locate(finding, Some(DOCUMENT_ANCHOR), None)
            })
        })
        .collect();

    Ok(findings)
}
