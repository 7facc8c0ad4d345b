#![forbid(unsafe_code)]

//! Extracted document input
//!
//! The binary document parser lives outside this crate. Its output is an
//! `ExtractedDocument`: section geometry in EMU plus raw paragraphs with
//! their style name, runs, line spacing and alignment. Anything implementing
//! [`DocumentSource`] can feed the snapshot builder.

use crate::error::SnapshotError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// English Metric Units per millimetre
pub const EMU_PER_MM: f64 = 36_000.0;

/// Paragraph alignment as reported by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    #[serde(alias = "both")]
    Justify,
    Distribute,
}

/// Page geometry of one document section, in EMU
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub left_margin: i64,
    pub right_margin: i64,
    pub top_margin: i64,
    pub bottom_margin: i64,
    pub page_width: i64,
    pub page_height: i64,
}

/// A formatting run inside a paragraph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRun {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub font_name: Option<String>,
    #[serde(default)]
    pub font_size_pt: Option<f64>,
}

/// A paragraph as the parser saw it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawParagraph {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub runs: Vec<RawRun>,
    /// Either a multiple (`1.5`) or whatever the parser produced
    #[serde(default)]
    pub line_spacing: Option<Value>,
    #[serde(default)]
    pub alignment: Option<Alignment>,
}

impl RawParagraph {
    /// Creates a paragraph whose single run carries the whole text
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            runs: vec![RawRun {
                text: text.clone(),
                ..RawRun::default()
            }],
            text,
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_line_spacing(mut self, spacing: f64) -> Self {
        self.line_spacing = Some(Value::from(spacing));
        self
    }

    /// Sets font name and size on every run
    pub fn with_font(mut self, name: Option<&str>, size_pt: Option<f64>) -> Self {
        for run in &mut self.runs {
            run.font_name = name.map(str::to_string);
            run.font_size_pt = size_pt;
        }
        self
    }
}

/// Anything that can provide section geometry and raw paragraphs
pub trait DocumentSource {
    /// The first section, if the document has any
    fn primary_section(&self) -> Option<SectionLayout>;

    /// All paragraphs in document order, including empty ones
    fn raw_paragraphs(&self) -> &[RawParagraph];
}

/// Parser output, serialized as JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    #[serde(default)]
    pub sections: Vec<SectionLayout>,
    #[serde(default)]
    pub paragraphs: Vec<RawParagraph>,
}

impl ExtractedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an extracted document from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Open` if the file cannot be read and
    /// `SnapshotError::Parse` if it is not a valid extracted document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| SnapshotError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn with_section(mut self, section: SectionLayout) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_paragraph(mut self, paragraph: RawParagraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }
}

impl DocumentSource for ExtractedDocument {
    fn primary_section(&self) -> Option<SectionLayout> {
        self.sections.first().copied()
    }

    fn raw_paragraphs(&self) -> &[RawParagraph] {
        &self.paragraphs
    }
}

/// Millimetres to EMU, for building test and fixture documents
pub fn mm_to_emu(mm: f64) -> i64 {
    (mm * EMU_PER_MM).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extracted_document() {
        let json = r#"{
            "sections": [{"left_margin": 1080000, "right_margin": 540000,
                          "top_margin": 720000, "bottom_margin": 720000,
                          "page_width": 7560000, "page_height": 10692000}],
            "paragraphs": [
                {"text": "ВВЕДЕНИЕ", "style": "Heading 1", "alignment": "center",
                 "runs": [{"text": "ВВЕДЕНИЕ", "font_name": "Times New Roman", "font_size_pt": 14.0}]},
                {"text": "Body", "alignment": "both", "line_spacing": 1.5}
            ]
        }"#;
        let doc: ExtractedDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.primary_section().unwrap().left_margin, 1_080_000);
        assert_eq!(doc.raw_paragraphs().len(), 2);
        assert_eq!(doc.paragraphs[0].alignment, Some(Alignment::Center));
        assert_eq!(doc.paragraphs[1].alignment, Some(Alignment::Justify));
        assert!(doc.paragraphs[1].runs.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_open_error() {
        let err = ExtractedDocument::load("/nonexistent/doc.json").unwrap_err();
        assert!(matches!(err, SnapshotError::Open { .. }));
    }

    #[test]
    fn test_load_malformed_is_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, "{not json").unwrap();
        let err = ExtractedDocument::load(&path).unwrap_err();
        assert!(matches!(err, SnapshotError::Parse { .. }));
    }

    #[test]
    fn test_mm_to_emu() {
        assert_eq!(mm_to_emu(30.0), 1_080_000);
        assert_eq!(mm_to_emu(0.5), 18_000);
    }

    #[test]
    fn test_builder_helpers() {
        let p = RawParagraph::new("Text")
            .with_style("Heading 2")
            .with_font(Some("Arial"), Some(12.0))
            .with_line_spacing(1.5);
        assert_eq!(p.runs[0].font_name.as_deref(), Some("Arial"));
        assert_eq!(p.line_spacing, Some(Value::from(1.5)));
    }
}
