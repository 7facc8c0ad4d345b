//! Performance benchmarks for gostcheck
//!
//! These benchmarks measure the performance of key operations:
//! - Snapshot building on documents of increasing size
//! - Ruleset execution with the shipped GOST 7.32-2017 standard
//! - Re-localization of findings after positional drift
//! - Rule definition compilation
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench snapshot_build
//! ```
//!
//! ## Expected Performance Characteristics
//!
//! - Snapshot building is linear in paragraph count; hashing dominates
//! - Checks that scan paragraphs stop after the first 500
//! - Re-localization indexes the snapshot once per finding list

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use gostcheck::engine::ExecutionEngine;
use gostcheck::finding::Finding;
use gostcheck::locator::relocalize_all;
use gostcheck::rules::{RuntimeRuleset, compile, load_definition};
use gostcheck::snapshot::source::{SectionLayout, mm_to_emu};
use gostcheck::snapshot::{Alignment, ExtractedDocument, RawParagraph, build_snapshot};
use serde_json::Value;
use std::path::Path;

// ============================================================================
// Test Data Generation
// ============================================================================

fn shipped_definition() -> Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("standards")
        .join("gost_7_32_2017.toml");
    load_definition(&path).unwrap()
}

fn shipped_ruleset() -> RuntimeRuleset {
    compile(&shipped_definition()).unwrap()
}

/// A report with the required headings followed by `body` paragraphs
fn synthetic_document(body: usize) -> ExtractedDocument {
    let section = SectionLayout {
        left_margin: mm_to_emu(30.0),
        right_margin: mm_to_emu(15.0),
        top_margin: mm_to_emu(20.0),
        bottom_margin: mm_to_emu(20.0),
        page_width: mm_to_emu(210.0),
        page_height: mm_to_emu(297.0),
    };
    let heading = |t: &str| {
        RawParagraph::new(t)
            .with_style("Heading 1")
            .with_alignment(Alignment::Center)
            .with_font(Some("Times New Roman"), Some(14.0))
    };

    let mut doc = ExtractedDocument::new()
        .with_section(section)
        .with_paragraph(heading("РЕФЕРАТ"))
        .with_paragraph(RawParagraph::new("Отчет 120 с., 14 рис., 6 табл., 40 источн., 2 прил."))
        .with_paragraph(RawParagraph::new(
            "Ключевые слова: ГОСТ, отчет, проверка, оформление, документ",
        ))
        .with_paragraph(heading("ВВЕДЕНИЕ"));

    for i in 0..body {
        doc = doc.with_paragraph(
            RawParagraph::new(format!(
                "Абзац {} основного текста отчета о научно-исследовательской работе.",
                i
            ))
            .with_style("Normal")
            .with_line_spacing(1.5)
            .with_font(Some("Times New Roman"), Some(14.0)),
        );
    }

    doc.with_paragraph(heading("ЗАКЛЮЧЕНИЕ"))
}

// ============================================================================
// Snapshot Benchmarks
// ============================================================================

fn bench_snapshot_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_build");

    for size in [100, 1_000, 10_000].iter() {
        let doc = synthetic_document(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| black_box(build_snapshot(doc)));
        });
    }

    group.finish();
}

// ============================================================================
// Execution Benchmarks
// ============================================================================

fn bench_ruleset_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("ruleset_execution");
    let ruleset = shipped_ruleset();
    let engine = ExecutionEngine::new();

    for size in [100, 1_000, 10_000].iter() {
        let snapshot = build_snapshot(&synthetic_document(*size));
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| black_box(engine.run_ruleset(snapshot, &ruleset)));
        });
    }

    group.finish();
}

fn bench_relocalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("relocalization");

    let old = build_snapshot(&synthetic_document(5_000));
    let new = build_snapshot(&synthetic_document(2_000));

    // Findings located near the end of the old version are stale in the new one.
    let findings: Vec<Finding> = old
        .paragraphs()
        .iter()
        .rev()
        .take(200)
        .map(|p| Finding {
            para_idx: Some(p.position),
            snippet: Some(p.snippet.clone()),
            content_hash: Some(p.content_hash.clone()),
            ..Finding::new(
                gostcheck::FindingSeverity::Low,
                gostcheck::Category::Font,
                "font",
                "fix",
            )
        })
        .collect();

    group.throughput(Throughput::Elements(findings.len() as u64));
    group.bench_function("200_stale_findings", |b| {
        b.iter(|| black_box(relocalize_all(&new, &findings)));
    });

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let definition = shipped_definition();
    c.bench_function("compile_shipped_standard", |b| {
        b.iter(|| black_box(compile(&definition).unwrap()));
    });
}

// ============================================================================
// Benchmark Registration
// ============================================================================

criterion_group!(snapshot_benches, bench_snapshot_build);

criterion_group!(
    engine_benches,
    bench_ruleset_execution,
    bench_relocalization,
    bench_compile,
);

criterion_main!(snapshot_benches, engine_benches);
