#![forbid(unsafe_code)]

//! Human-readable findings report, coloured by severity

use crate::finding::Finding;
use crate::output::SeverityCounts;
use crate::types::FindingSeverity;
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Human-readable formatter
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Write one block per finding, then a totals line
    ///
    /// ```text
    /// HIGH [S1] §5.1 STRUCTURE Missing required structural element «ЗАКЛЮЧЕНИЕ».
    ///   at: ЗАКЛЮЧЕНИЕ #?
    ///   fix: Add the «ЗАКЛЮЧЕНИЕ» section ...
    /// ```
    pub fn write(&self, out: &mut dyn WriteColor, findings: &[Finding]) -> io::Result<()> {
        for finding in findings {
            out.set_color(&severity_color(finding.severity))?;
            write!(out, "{}", finding.severity)?;
            out.reset()?;

            write!(out, " [{}]", finding.rule_id.as_deref().unwrap_or("-"))?;
            if let Some(clause) = &finding.clause {
                write!(out, " §{}", clause)?;
            }
            writeln!(out, " {} {}", finding.category, finding.message)?;

            writeln!(out, "  at: {}", location(finding))?;
            if let Some(snippet) = &finding.snippet {
                writeln!(out, "  text: {}", snippet)?;
            }
            writeln!(out, "  fix: {}", finding.suggestion)?;
            writeln!(out)?;
        }

        let counts = SeverityCounts::from_findings(findings);
        out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(
            out,
            "{} findings: {} high, {} medium, {} low, {} need review",
            counts.total, counts.high, counts.medium, counts.low, counts.need_review
        )?;
        out.reset()
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn location(finding: &Finding) -> String {
    let anchor = finding.anchor.as_deref().unwrap_or("-");
    match finding.para_idx {
        Some(idx) => format!("{} #{}", anchor, idx),
        None => format!("{} #?", anchor),
    }
}

fn severity_color(severity: FindingSeverity) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_bold(true);
    match severity {
        FindingSeverity::High => spec.set_fg(Some(Color::Red)),
        FindingSeverity::Medium => spec.set_fg(Some(Color::Yellow)),
        FindingSeverity::Low => spec.set_fg(Some(Color::Cyan)),
        FindingSeverity::NeedReview => spec.set_fg(Some(Color::Magenta)),
    };
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use termcolor::{Buffer, NoColor};

    fn render(findings: &[Finding]) -> String {
        let mut out = NoColor::new(Vec::new());
        HumanFormatter::new().write(&mut out, findings).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_block_layout() {
        let mut f = Finding::new(FindingSeverity::High, Category::Structure, "Missing «ЗАКЛЮЧЕНИЕ».", "Add it.");
        f.rule_id = Some("S1".to_string());
        f.clause = Some("5.1".to_string());
        f.anchor = Some("ЗАКЛЮЧЕНИЕ".to_string());

        let text = render(&[f]);
        assert!(text.starts_with("HIGH [S1] §5.1 STRUCTURE Missing «ЗАКЛЮЧЕНИЕ».\n"));
        assert!(text.contains("  at: ЗАКЛЮЧЕНИЕ #?\n"));
        assert!(text.contains("  fix: Add it.\n"));
        assert!(text.ends_with("1 findings: 1 high, 0 medium, 0 low, 0 need review\n"));
    }

    #[test]
    fn test_located_finding_shows_position_and_snippet() {
        let mut f = Finding::new(FindingSeverity::Low, Category::Font, "small", "bigger");
        f.para_idx = Some(12);
        f.snippet = Some("Body text".to_string());

        let text = render(&[f]);
        assert!(text.starts_with("LOW [-] FONT small\n"));
        assert!(text.contains("  at: - #12\n"));
        assert!(text.contains("  text: Body text\n"));
    }

    #[test]
    fn test_ansi_output_colours_severity() {
        let f = Finding::new(FindingSeverity::High, Category::Layout, "m", "s");
        let mut out = Buffer::ansi();
        HumanFormatter::new().write(&mut out, &[f]).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("\x1b[0m"));
        assert!(text.contains("HIGH"));
    }
}
