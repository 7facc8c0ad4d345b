//! End-to-end tests driving the gostcheck binary

mod common;

use assert_cmd::Command;
use common::{TestResult, a4_section, fixture_path, write_document};
use gostcheck::snapshot::{ExtractedDocument, RawParagraph};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn gostcheck() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gostcheck"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn jsonl_records(stdout: &[u8]) -> TestResult<Vec<Value>> {
    let text = std::str::from_utf8(stdout)?;
    Ok(text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?)
}

#[test]
fn test_compile_writes_default_output() -> TestResult {
    let dir = TempDir::new()?;
    let input = dir.path().join("gost.toml");
    fs::copy(fixture_path("gost_minimal.toml"), &input)?;

    gostcheck()
        .arg("compile")
        .arg(&input)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Compiled 6 rules into"));

    assert!(dir.path().join("gost.runtime.json").exists());
    Ok(())
}

#[test]
fn test_compile_invalid_definition_exits_3() -> TestResult {
    let dir = TempDir::new()?;
    let input = dir.path().join("bad.toml");
    fs::write(
        &input,
        r#"
severity_levels = ["BLOCKER"]
[standard]
code = "X"
title = "X"
version = "1"
effective_date = "2020-01-01"
language = "ru"
[[rules]]
id = "R1"
severity = "blocker"
title = "t"
scope = "s"
check = { type = "no_such_check" }
"#,
    )?;

    gostcheck()
        .arg("compile")
        .arg(&input)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no_such_check"));
    assert!(!dir.path().join("bad.runtime.json").exists());
    Ok(())
}

#[test]
fn test_compile_missing_file_exits_2() {
    gostcheck()
        .args(["compile", "/nonexistent/gost.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_check_clean_report_exits_0() -> TestResult {
    let output = gostcheck()
        .arg("check")
        .arg(fixture_path("report_clean.json"))
        .arg("--ruleset")
        .arg(fixture_path("gost_minimal.toml"))
        .args(["--format", "jsonl"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let records = jsonl_records(&output.stdout)?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["type"], "finding");
    assert_eq!(records[0]["category"], "INFO");
    assert_eq!(records[1]["type"], "summary");
    assert_eq!(records[1]["total"], 1);
    assert_eq!(records[1]["high"], 0);
    Ok(())
}

#[test]
fn test_check_violations_exits_1_jsonl() -> TestResult {
    let output = gostcheck()
        .arg("check")
        .arg(fixture_path("report_violations.json"))
        .arg("--ruleset")
        .arg(fixture_path("gost_minimal.toml"))
        .args(["-f", "jsonl"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));

    let records = jsonl_records(&output.stdout)?;
    let findings: Vec<&Value> = records.iter().filter(|r| r["type"] == "finding").collect();
    assert_eq!(findings.len(), 6);
    assert_eq!(findings[0]["rule_id"], "STRUCT-001");
    assert_eq!(findings[0]["severity"], "HIGH");
    assert_eq!(findings[2]["para_idx"], 4);

    let summary = records.last().ok_or("no summary record")?;
    assert_eq!(summary["high"], 1);
    assert_eq!(summary["medium"], 2);
    assert_eq!(summary["low"], 3);
    Ok(())
}

#[test]
fn test_check_violations_human_output() -> TestResult {
    let dir = TempDir::new()?;
    let ruleset = dir.path().join("gost.runtime.json");
    gostcheck()
        .arg("compile")
        .arg(fixture_path("gost_minimal.toml"))
        .arg("-o")
        .arg(&ruleset)
        .assert()
        .code(0);

    gostcheck()
        .arg("check")
        .arg(fixture_path("report_violations.json"))
        .arg("--ruleset")
        .arg(&ruleset)
        .args(["--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("HIGH [STRUCT-001] §5.1 STRUCTURE"))
        .stdout(predicate::str::contains("at: ЗАКЛЮЧЕНИЕ #?"))
        .stdout(predicate::str::contains(
            "6 findings: 1 high, 2 medium, 3 low, 0 need review",
        ))
        .stderr(predicate::str::contains(
            "Checking 5 paragraphs with 6 rules (GOST 7.32-2017)",
        ));
    Ok(())
}

#[test]
fn test_check_without_ruleset_exits_2() -> TestResult {
    let dir = TempDir::new()?;
    gostcheck()
        .current_dir(dir.path())
        .arg("check")
        .arg(fixture_path("report_clean.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No ruleset given"));
    Ok(())
}

#[test]
fn test_check_uses_ruleset_from_config() -> TestResult {
    let dir = TempDir::new()?;
    fs::copy(fixture_path("gost_minimal.toml"), dir.path().join("rules.toml"))?;
    fs::write(
        dir.path().join("gostcheck.toml"),
        "[checker]\nversion = \"1\"\nruleset = \"rules.toml\"\n\n[output]\nformat = \"jsonl\"\n",
    )?;

    let output = gostcheck()
        .current_dir(dir.path())
        .arg("check")
        .arg(fixture_path("report_violations.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(1));

    let records = jsonl_records(&output.stdout)?;
    assert_eq!(records.len(), 7);
    Ok(())
}

#[test]
fn test_check_invalid_config_exits_3() -> TestResult {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("gostcheck.toml"), "[checker]\nversion = \"2\"\n")?;

    gostcheck()
        .current_dir(dir.path())
        .arg("check")
        .arg(fixture_path("report_clean.json"))
        .arg("--ruleset")
        .arg(fixture_path("gost_minimal.toml"))
        .assert()
        .code(3);
    Ok(())
}

#[test]
fn test_snapshot_prints_json() -> TestResult {
    let output = gostcheck()
        .arg("snapshot")
        .arg(fixture_path("report_clean.json"))
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let snapshot: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(snapshot["margins"]["left_mm"], 30.0);
    assert_eq!(snapshot["paragraphs"].as_array().map(Vec::len), Some(6));
    assert_eq!(snapshot["anchor_map"]["ВВЕДЕНИЕ"], 3);
    Ok(())
}

#[test]
fn test_relocate_moves_stale_positions() -> TestResult {
    let dir = TempDir::new()?;
    let check = gostcheck()
        .arg("check")
        .arg(fixture_path("report_violations.json"))
        .arg("--ruleset")
        .arg(fixture_path("gost_minimal.toml"))
        .args(["--format", "jsonl"])
        .output()?;
    let findings_path = dir.path().join("findings.jsonl");
    fs::write(&findings_path, &check.stdout)?;

    // The newer version keeps only two of the old paragraphs.
    let newer = ExtractedDocument::new()
        .with_section(a4_section(35.0, 15.0, 20.0, 20.0))
        .with_paragraph(RawParagraph::new("Ключевые слова: ГОСТ, отчет, проверка"))
        .with_paragraph(RawParagraph::new("Текст набран слишком мелким шрифтом."));
    let newer_path = write_document(dir.path(), "newer.json", &newer)?;

    let output = gostcheck()
        .arg("relocate")
        .arg(&findings_path)
        .arg(&newer_path)
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let records = jsonl_records(&output.stdout)?;
    assert_eq!(records.len(), 6);
    assert!(records.iter().all(|r| r["type"] == "finding"));

    let by_rule = |id: &str| records.iter().find(|r| r["rule_id"] == id).cloned();
    assert_eq!(by_rule("FONT-001").ok_or("FONT-001")?["para_idx"], 1);
    assert_eq!(by_rule("ABS-002").ok_or("ABS-002")?["para_idx"], 0);
    Ok(())
}

#[test]
fn test_relocate_rejects_malformed_findings() -> TestResult {
    let dir = TempDir::new()?;
    let findings_path = dir.path().join("findings.jsonl");
    fs::write(&findings_path, "{not json}\n")?;

    gostcheck()
        .arg("relocate")
        .arg(&findings_path)
        .arg(fixture_path("report_clean.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid findings file"));
    Ok(())
}
