//! Test utilities for gostcheck integration tests

#![allow(dead_code)]

use gostcheck::snapshot::ExtractedDocument;
use gostcheck::snapshot::source::{SectionLayout, mm_to_emu};
use std::path::{Path, PathBuf};

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn standards_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("standards").join(name)
}

/// A4 section with the given margins in millimetres
pub fn a4_section(left: f64, right: f64, top: f64, bottom: f64) -> SectionLayout {
    SectionLayout {
        left_margin: mm_to_emu(left),
        right_margin: mm_to_emu(right),
        top_margin: mm_to_emu(top),
        bottom_margin: mm_to_emu(bottom),
        page_width: mm_to_emu(210.0),
        page_height: mm_to_emu(297.0),
    }
}

/// Serialize a document into `dir` and return its path
pub fn write_document(dir: &Path, name: &str, doc: &ExtractedDocument) -> TestResult<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(doc)?)?;
    Ok(path)
}
