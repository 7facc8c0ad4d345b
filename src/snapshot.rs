#![forbid(unsafe_code)]

//! Structural snapshot of one document version
//!
//! A snapshot is built once per extraction and never mutated. Paragraph
//! positions are dense and meaningful only inside the snapshot that produced
//! them; `content_hash` is what survives a re-extraction.

pub mod builder;
pub mod source;

pub use builder::{build_snapshot, snapshot_from_path};
pub use source::{
    Alignment, DocumentSource, ExtractedDocument, RawParagraph, RawRun, SectionLayout,
};

use serde::Serialize;
use std::collections::BTreeMap;

/// Page margins and size of the primary section, in millimetres
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Margins {
    pub left_mm: f64,
    pub right_mm: f64,
    pub top_mm: f64,
    pub bottom_mm: f64,
    pub page_width_mm: f64,
    pub page_height_mm: f64,
}

/// One of the four page edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl MarginEdge {
    pub const ALL: [MarginEdge; 4] = [
        MarginEdge::Left,
        MarginEdge::Right,
        MarginEdge::Top,
        MarginEdge::Bottom,
    ];

    /// Argument and field name, e.g. `left_mm`
    pub fn key(&self) -> &'static str {
        match self {
            MarginEdge::Left => "left_mm",
            MarginEdge::Right => "right_mm",
            MarginEdge::Top => "top_mm",
            MarginEdge::Bottom => "bottom_mm",
        }
    }
}

impl std::fmt::Display for MarginEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MarginEdge::Left => "left",
            MarginEdge::Right => "right",
            MarginEdge::Top => "top",
            MarginEdge::Bottom => "bottom",
        })
    }
}

impl Margins {
    pub fn edge(&self, edge: MarginEdge) -> f64 {
        match edge {
            MarginEdge::Left => self.left_mm,
            MarginEdge::Right => self.right_mm,
            MarginEdge::Top => self.top_mm,
            MarginEdge::Bottom => self.bottom_mm,
        }
    }
}

/// Structural role derived from the paragraph's style name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StyleRole {
    #[default]
    Body,
    Heading {
        level: Option<u32>,
    },
}

impl StyleRole {
    pub fn is_heading(&self) -> bool {
        matches!(self, StyleRole::Heading { .. })
    }
}

/// A non-empty paragraph with its derived attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub position: usize,
    pub text: String,
    pub text_upper: String,
    pub content_hash: String,
    pub snippet: String,
    pub char_len: usize,
    pub style: Option<String>,
    pub style_role: StyleRole,
    pub font_name: Option<String>,
    pub font_size_pt: Option<f64>,
    pub line_spacing: Option<f64>,
    pub alignment: Option<Alignment>,
    pub is_upper: bool,
}

/// The normalized, order-preserving record of one document version
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSnapshot {
    margins: Option<Margins>,
    paragraphs: Vec<Paragraph>,
    anchor_map: BTreeMap<String, usize>,
}

impl DocumentSnapshot {
    pub(crate) fn new(
        margins: Option<Margins>,
        paragraphs: Vec<Paragraph>,
        anchor_map: BTreeMap<String, usize>,
    ) -> Self {
        Self {
            margins,
            paragraphs,
            anchor_map,
        }
    }

    /// Measured margins, absent when the document has no section
    pub fn margins(&self) -> Option<&Margins> {
        self.margins.as_ref()
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Canonical heading key → paragraph position
    pub fn anchor_map(&self) -> &BTreeMap<String, usize> {
        &self.anchor_map
    }

    /// The paragraph at `position`, if it exists in this snapshot
    pub fn paragraph(&self, position: usize) -> Option<&Paragraph> {
        self.paragraphs.get(position)
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}
