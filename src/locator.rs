#![forbid(unsafe_code)]

//! Location resolution for findings
//!
//! Findings are stamped with a location against one snapshot. Positions
//! drift between extractions, so a finding whose `para_idx` no longer
//! points at its own paragraph in a newer snapshot is re-resolved by content
//! hash first and by snippet text second.
//!
//! Every function here is pure: it returns a new `Finding` and never
//! touches its input.

use crate::finding::Finding;
use crate::snapshot::DocumentSnapshot;
use crate::text::{heading_key, normalize_text};
use std::collections::HashMap;

/// Resolves a heading anchor to a paragraph position
pub fn locate_anchor(snapshot: &DocumentSnapshot, anchor: &str) -> Option<usize> {
    let key = heading_key(anchor);
    snapshot.anchor_map().get(key.trim()).copied()
}

/// Fills in location fields the finding does not already carry
///
/// Position is resolved from, in order: the explicit `para_idx`, the
/// finding's own `para_idx`, then the anchor. A position is only written
/// if the finding had none and the paragraph exists in `snapshot`.
pub fn attach_location(
    snapshot: &DocumentSnapshot,
    finding: &Finding,
    anchor: Option<&str>,
    para_idx: Option<usize>,
) -> Finding {
    let mut out = finding.clone();
    let anchor = anchor.filter(|a| !a.is_empty());

    if let Some(a) = anchor
        && out.anchor.as_deref().is_none_or(str::is_empty)
    {
        out.anchor = Some(a.to_string());
    }

    if out.para_idx.is_none() {
        let resolved = para_idx.or_else(|| anchor.and_then(|a| locate_anchor(snapshot, a)));
        out.para_idx = resolved.filter(|&p| snapshot.paragraph(p).is_some());
        if out.para_idx.is_none() && (anchor.is_some() || para_idx.is_some()) {
            tracing::debug!(?anchor, ?para_idx, "finding location not resolved");
        }
    }

    if let Some(p) = out.para_idx.and_then(|p| snapshot.paragraph(p)) {
        out.snippet.get_or_insert_with(|| p.snippet.clone());
        out.content_hash.get_or_insert_with(|| p.content_hash.clone());
    }

    out
}

/// First-occurrence lookups over a snapshot's paragraphs
pub struct ParagraphIndex<'a> {
    by_hash: HashMap<&'a str, usize>,
    by_upper: HashMap<&'a str, usize>,
}

impl<'a> ParagraphIndex<'a> {
    pub fn new(snapshot: &'a DocumentSnapshot) -> Self {
        let mut by_hash = HashMap::new();
        let mut by_upper = HashMap::new();
        for p in snapshot.paragraphs() {
            by_hash.entry(p.content_hash.as_str()).or_insert(p.position);
            by_upper.entry(p.text_upper.as_str()).or_insert(p.position);
        }
        Self { by_hash, by_upper }
    }

    pub fn by_hash(&self, hash: &str) -> Option<usize> {
        self.by_hash.get(hash).copied()
    }

    pub fn by_upper_text(&self, upper: &str) -> Option<usize> {
        self.by_upper.get(upper).copied()
    }
}

/// Re-resolves a finding whose position is stale in `snapshot`
///
/// A position is kept while the paragraph there exists and still carries the
/// finding's content hash. Otherwise an exact content-hash match is
/// tried, then the upper-cased snippet against full paragraph text. If both
/// miss, the finding is returned unchanged.
pub fn relocalize_issue(snapshot: &DocumentSnapshot, finding: &Finding) -> Finding {
    relocalize_with_index(snapshot, &ParagraphIndex::new(snapshot), finding)
}

/// Re-resolves a whole finding list, indexing the snapshot once
pub fn relocalize_all(snapshot: &DocumentSnapshot, findings: &[Finding]) -> Vec<Finding> {
    let index = ParagraphIndex::new(snapshot);
    findings
        .iter()
        .map(|f| relocalize_with_index(snapshot, &index, f))
        .collect()
}

/// The stored position exists and, when the finding carries a hash, the
/// paragraph there still has that hash
fn still_located(snapshot: &DocumentSnapshot, finding: &Finding) -> bool {
    finding
        .para_idx
        .and_then(|p| snapshot.paragraph(p))
        .is_some_and(|p| {
            finding
                .content_hash
                .as_deref()
                .is_none_or(|h| h == p.content_hash)
        })
}

fn relocalize_with_index(
    snapshot: &DocumentSnapshot,
    index: &ParagraphIndex<'_>,
    finding: &Finding,
) -> Finding {
    if still_located(snapshot, finding) {
        return finding.clone();
    }

    let mut out = finding.clone();

    if let Some(position) = finding.content_hash.as_deref().and_then(|h| index.by_hash(h)) {
        tracing::debug!(
            from = ?finding.para_idx,
            to = position,
            "relocated finding by content hash"
        );
        out.para_idx = Some(position);
        if let Some(p) = snapshot.paragraph(position) {
            out.snippet = Some(p.snippet.clone());
        }
        return out;
    }

    let snippet = normalize_text(finding.snippet.as_deref().unwrap_or(""));
    if !snippet.is_empty()
        && let Some(position) = index.by_upper_text(&snippet.to_uppercase())
    {
        tracing::debug!(
            from = ?finding.para_idx,
            to = position,
            "relocated finding by snippet"
        );
        out.para_idx = Some(position);
        if let Some(p) = snapshot.paragraph(position) {
            out.content_hash = Some(p.content_hash.clone());
        }
        return out;
    }

    out
}
