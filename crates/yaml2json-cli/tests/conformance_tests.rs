//! Data-driven conformance cases for the `yaml2json` binary.
//!
//! Every `tests/fixtures/*.test` file is one case:
//!
//! ```text
//! <YAML input>
//! ================================================================================
//! <expected JSON>
//! ```
//!
//! The expected JSON is compared as a parsed tree, so formatting and key order
//! in the fixture do not matter. A line of 80 `!` instead of 80 `=` means the
//! binary must exit non-zero; anything after it is ignored. A first line of
//! `XFAIL` marks a known divergence: the case must still fail, so fixing it
//! shows up as a failure here until the marker is removed.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

const EXPECT_JSON: &str = "================================================================================";
const EXPECT_ERROR: &str = "!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!";

#[derive(Debug, PartialEq)]
enum Expected {
    Json(serde_json::Value),
    Failure,
}

#[derive(Debug)]
struct Case {
    input: String,
    expected: Expected,
    xfail: bool,
}

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn parse_case(text: &str) -> Result<Case, String> {
    let (xfail, text) = match text.strip_prefix("XFAIL\n") {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    if let Some((input, _)) = text.split_once(EXPECT_ERROR) {
        return Ok(Case {
            input: input.to_owned(),
            expected: Expected::Failure,
            xfail,
        });
    }

    let mut parts = text.split(EXPECT_JSON);
    let (Some(input), Some(expected), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("expected exactly one separator line".to_owned());
    };
    let expected = serde_json::from_str(expected)
        .map_err(|err| format!("expected output is not JSON: {err}"))?;
    Ok(Case {
        input: input.to_owned(),
        expected: Expected::Json(expected),
        xfail,
    })
}

/// Run one case through the binary. `Ok(())` means the binary behaved as the
/// case expects.
fn run_case(case: &Case) -> Result<(), String> {
    let output = Command::cargo_bin("yaml2json")
        .map_err(|err| err.to_string())?
        .write_stdin(case.input.as_bytes())
        .output()
        .map_err(|err| err.to_string())?;

    match &case.expected {
        Expected::Failure if output.status.success() => Err(format!(
            "expected a non-zero exit, got output {}",
            String::from_utf8_lossy(&output.stdout)
        )),
        Expected::Failure => Ok(()),
        Expected::Json(_) if !output.status.success() => Err(format!(
            "conversion exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        )),
        Expected::Json(expected) => {
            let actual: serde_json::Value = serde_json::from_slice(&output.stdout)
                .map_err(|err| format!("output is not JSON: {err}"))?;
            if actual == *expected {
                Ok(())
            } else {
                Err(format!("expected {expected}, got {actual}"))
            }
        }
    }
}

fn case_files() -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(fixtures_dir())
        .expect("fixtures directory is readable")
        .map(|entry| entry.expect("fixture entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "test"))
        .collect();
    files.sort();
    files
}

#[test]
fn fixture_cases() {
    let files = case_files();
    assert!(!files.is_empty(), "no .test fixtures found");

    let mut failures = Vec::new();
    for path in &files {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        let text = fs::read_to_string(path).expect("fixture is UTF-8");
        let case = match parse_case(&text) {
            Ok(case) => case,
            Err(err) => {
                failures.push(format!("{name}: malformed fixture: {err}"));
                continue;
            }
        };
        match (run_case(&case), case.xfail) {
            (Ok(()), false) | (Err(_), true) => {}
            (Err(err), false) => failures.push(format!("{name}: {err}")),
            (Ok(()), true) => failures.push(format!("{name}: marked XFAIL but now passes")),
        }
    }

    assert!(
        failures.is_empty(),
        "{} of {} fixture cases failed:\n{}",
        failures.len(),
        files.len(),
        failures.join("\n")
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixture format
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parses_expected_json_case() {
    let case = parse_case(&format!("a: 1\n{EXPECT_JSON}\n{{\"a\": 1}}\n")).unwrap();
    assert_eq!(case.input, "a: 1\n");
    assert_eq!(case.expected, Expected::Json(serde_json::json!({"a": 1})));
    assert!(!case.xfail);
}

#[test]
fn parses_expected_failure_case() {
    let case = parse_case(&format!("key: [1\n{EXPECT_ERROR}\nignored\n")).unwrap();
    assert_eq!(case.input, "key: [1\n");
    assert_eq!(case.expected, Expected::Failure);
}

#[test]
fn parses_xfail_marker() {
    let case = parse_case(&format!("XFAIL\nx: y\n{EXPECT_JSON}\n{{}}\n")).unwrap();
    assert!(case.xfail);
    assert_eq!(case.input, "x: y\n");
}

#[test]
fn rejects_case_without_separator() {
    assert!(parse_case("key: value\n").is_err());
}
