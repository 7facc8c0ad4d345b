#![forbid(unsafe_code)]

//! Snapshot builder
//!
//! Converts parser output into a `DocumentSnapshot`:
//! - empty paragraphs are skipped and the rest numbered densely
//! - style role, font, spacing and case are derived per paragraph
//! - margins come from the primary section, in millimetres; a document
//!   without sections has none
//! - the anchor map is built from heading styles, falling back to short
//!   all-uppercase lines when the document uses no heading styles at all

use crate::error::SnapshotError;
use crate::snapshot::source::{
    DocumentSource, EMU_PER_MM, ExtractedDocument, RawParagraph, SectionLayout,
};
use crate::snapshot::{DocumentSnapshot, Margins, Paragraph, StyleRole};
use crate::text::{content_hash, heading_key, is_all_uppercase, normalize_text, snippet};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

/// Style-name markers for headings, English and Russian Word locales
const HEADING_STYLE_MARKERS: [&str; 2] = ["heading", "заголовок"];

/// Longest text accepted as a fallback anchor
const FALLBACK_ANCHOR_MAX_CHARS: usize = 80;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("digit regex"));

/// Load an extracted document from disk and build its snapshot
///
/// # Errors
///
/// Returns `SnapshotError` if the document cannot be opened or parsed.
pub fn snapshot_from_path(path: impl AsRef<Path>) -> Result<DocumentSnapshot, SnapshotError> {
    let document = ExtractedDocument::load(path)?;
    Ok(build_snapshot(&document))
}

/// Build a snapshot from any document source
pub fn build_snapshot<S: DocumentSource + ?Sized>(source: &S) -> DocumentSnapshot {
    let margins = source.primary_section().map(section_margins);

    let paragraphs: Vec<Paragraph> = source
        .raw_paragraphs()
        .iter()
        .filter_map(|raw| {
            let text = normalize_text(&raw.text);
            (!text.is_empty()).then_some((raw, text))
        })
        .enumerate()
        .map(|(position, (raw, text))| derive_paragraph(position, raw, text))
        .collect();

    let anchor_map = build_anchor_map(&paragraphs);

    tracing::debug!(
        paragraphs = paragraphs.len(),
        anchors = anchor_map.len(),
        "built document snapshot"
    );

    DocumentSnapshot::new(margins, paragraphs, anchor_map)
}

fn section_margins(section: SectionLayout) -> Margins {
    Margins {
        left_mm: emu_to_mm(section.left_margin),
        right_mm: emu_to_mm(section.right_margin),
        top_mm: emu_to_mm(section.top_margin),
        bottom_mm: emu_to_mm(section.bottom_margin),
        page_width_mm: emu_to_mm(section.page_width),
        page_height_mm: emu_to_mm(section.page_height),
    }
}

/// EMU to millimetres, rounded to two decimals
fn emu_to_mm(emu: i64) -> f64 {
    (emu as f64 / EMU_PER_MM * 100.0).round() / 100.0
}

fn derive_paragraph(position: usize, raw: &RawParagraph, text: String) -> Paragraph {
    let style_role = style_role(raw.style.as_deref());
    let (font_name, font_size_pt) = first_run_font(raw);
    let line_spacing = raw
        .line_spacing
        .as_ref()
        .and_then(|v| v.as_f64())
        .filter(|v| *v != 0.0);

    Paragraph {
        position,
        text_upper: text.to_uppercase(),
        content_hash: content_hash(&text),
        snippet: snippet(&text),
        char_len: text.chars().count(),
        style: raw.style.clone(),
        style_role,
        font_name,
        font_size_pt,
        line_spacing,
        alignment: raw.alignment,
        is_upper: is_all_uppercase(&text),
        text,
    }
}

fn style_role(style: Option<&str>) -> StyleRole {
    let Some(name) = style else {
        return StyleRole::Body;
    };
    let lower = name.to_lowercase();
    if !HEADING_STYLE_MARKERS.iter().any(|m| lower.contains(m)) {
        return StyleRole::Body;
    }
    let level = DIGITS
        .find(name)
        .and_then(|m| m.as_str().parse::<u32>().ok());
    StyleRole::Heading { level }
}

/// Font of the first run with text that supplies a name or a size
///
/// Both values come from that one run; later runs are never merged in.
fn first_run_font(raw: &RawParagraph) -> (Option<String>, Option<f64>) {
    raw.runs
        .iter()
        .filter(|run| !run.text.is_empty())
        .map(|run| {
            let name = run.font_name.clone().filter(|n| !n.is_empty());
            let size = run.font_size_pt.filter(|s| *s > 0.0);
            (name, size)
        })
        .find(|(name, size)| name.is_some() || size.is_some())
        .unwrap_or((None, None))
}

/// Canonical heading key → first paragraph position carrying it
fn build_anchor_map(paragraphs: &[Paragraph]) -> BTreeMap<String, usize> {
    let mut anchors = BTreeMap::new();
    for p in paragraphs.iter().filter(|p| p.style_role.is_heading()) {
        insert_first(&mut anchors, &p.text, p.position);
    }

    if anchors.is_empty() {
        for p in paragraphs
            .iter()
            .filter(|p| p.char_len <= FALLBACK_ANCHOR_MAX_CHARS && p.is_upper)
        {
            insert_first(&mut anchors, &p.text, p.position);
        }
    }

    anchors
}

fn insert_first(anchors: &mut BTreeMap<String, usize>, text: &str, position: usize) {
    let key = heading_key(text);
    if !key.is_empty() {
        anchors.entry(key).or_insert(position);
    }
}
