//! Integration tests for the fix-it pipeline.
//!
//! These tests exercise the full run: source loading, diagnostic intake,
//! validation, edit application, and materialization. They write real
//! files to a temp directory and invoke `run` directly.

use std::fs;
use std::path::{Path, PathBuf};

use fixit::cli::Args;
use fixit::run;

/// Create a temporary directory with a unique name for each test.
fn temp_dir(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fixit_integration_{test_name}"));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn args(input: PathBuf, diagnostics: PathBuf) -> Args {
    Args {
        input,
        diagnostics,
        output: None,
        format: "quiet".to_string(),
        debug: false,
    }
}

// ---------- Full pipeline ----------

#[test]
fn applies_hints_and_writes_sibling_file() {
    let dir = temp_dir("sibling");
    let input = write_file(&dir, "prog.c", b"int x = 1;");
    let diags = write_file(
        &dir,
        "diags.json",
        br#"[
            {
                "severity": "warning",
                "message": "x should be const",
                "at": 4,
                "hints": [{ "at": 0, "text": "const " }]
            },
            {
                "severity": "warning",
                "message": "initializer should be 2",
                "hints": [{ "range": { "begin": 8, "end": 9 }, "text": "2" }]
            }
        ]"#,
    );

    let code = run(args(input.clone(), diags)).unwrap();
    assert_eq!(code, 0);
    let fixed = dir.join("prog.fixit.c");
    assert_eq!(fs::read(&fixed).unwrap(), b"const int x = 2;");
    // The input itself is never modified.
    assert_eq!(fs::read(&input).unwrap(), b"int x = 1;");
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn explicit_output_path_wins() {
    let dir = temp_dir("explicit_output");
    let input = write_file(&dir, "prog.c", b"abc def");
    let diags = write_file(
        &dir,
        "diags.json",
        br#"[{ "severity": "note", "message": "m",
              "hints": [{ "range": { "begin": 0, "end": 3 }, "text": "xyz" }] }]"#,
    );
    let dest = dir.join("fixed.c");

    let mut a = args(input, diags);
    a.output = Some(dest.clone());
    let code = run(a).unwrap();
    assert_eq!(code, 0);
    assert_eq!(fs::read(&dest).unwrap(), b"xyz def");
    assert!(!dir.join("prog.fixit.c").exists());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn removal_hint_excises_text() {
    let dir = temp_dir("removal");
    let input = write_file(&dir, "prog.c", b"int  x;");
    let diags = write_file(
        &dir,
        "diags.json",
        br#"[{ "severity": "warning", "message": "double space",
              "hints": [{ "range": { "begin": 3, "end": 4 } }] }]"#,
    );

    let code = run(args(input, diags)).unwrap();
    assert_eq!(code, 0);
    assert_eq!(fs::read(dir.join("prog.fixit.c")).unwrap(), b"int x;");
    fs::remove_dir_all(&dir).ok();
}

// ---------- Failure policy ----------

#[test]
fn error_without_hints_suppresses_output() {
    let dir = temp_dir("suppression");
    let input = write_file(&dir, "prog.c", b"int x = 1;");
    let diags = write_file(
        &dir,
        "diags.json",
        br#"[
            {
                "severity": "warning",
                "message": "x should be const",
                "hints": [{ "at": 0, "text": "const " }]
            },
            { "severity": "error", "message": "undeclared identifier" }
        ]"#,
    );

    // The warning's edit applied, but the unadvised error gates the write.
    let code = run(args(input, diags)).unwrap();
    assert_eq!(code, 1);
    assert!(!dir.join("prog.fixit.c").exists());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn invalid_range_on_error_diagnostic_suppresses_output() {
    let dir = temp_dir("invalid_range");
    let input = write_file(&dir, "prog.c", b"int x = 1;");
    let diags = write_file(
        &dir,
        "diags.json",
        br#"[{ "severity": "error", "message": "broken hint",
              "hints": [{ "range": { "begin": 5, "end": 999 }, "text": "y" }] }]"#,
    );

    let code = run(args(input, diags)).unwrap();
    assert_eq!(code, 1);
    assert!(!dir.join("prog.fixit.c").exists());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn conflicting_edits_suppress_output() {
    let dir = temp_dir("conflict");
    let input = write_file(&dir, "prog.c", b"abcdefgh");
    let diags = write_file(
        &dir,
        "diags.json",
        br#"[
            { "severity": "warning", "message": "first",
              "hints": [{ "range": { "begin": 2, "end": 6 }, "text": "XX" }] },
            { "severity": "warning", "message": "second",
              "hints": [{ "range": { "begin": 4, "end": 8 }, "text": "YY" }] }
        ]"#,
    );

    let code = run(args(input, diags)).unwrap();
    assert_eq!(code, 1);
    assert!(!dir.join("prog.fixit.c").exists());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn rejected_warning_costs_nothing() {
    let dir = temp_dir("rejected_warning");
    let input = write_file(&dir, "prog.c", b"int x = 1;");
    let diags = write_file(
        &dir,
        "diags.json",
        br#"[
            { "severity": "warning", "message": "no advice here" },
            { "severity": "note", "message": "just so you know" }
        ]"#,
    );

    // Hintless warnings and notes are rejected without failing the run;
    // nothing was edited, so the input is reported unchanged.
    let code = run(args(input, diags)).unwrap();
    assert_eq!(code, 0);
    assert!(!dir.join("prog.fixit.c").exists());
    fs::remove_dir_all(&dir).ok();
}

// ---------- Intake errors ----------

#[test]
fn missing_input_file_is_a_hard_error() {
    let dir = temp_dir("missing_input");
    let diags = write_file(&dir, "diags.json", b"[]");
    let result = run(args(dir.join("nope.c"), diags));
    assert!(result.is_err());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn malformed_diagnostics_are_a_hard_error() {
    let dir = temp_dir("malformed_diags");
    let input = write_file(&dir, "prog.c", b"int x;");
    let diags = write_file(&dir, "diags.json", b"{ not json");
    let result = run(args(input, diags));
    assert!(result.is_err());
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn empty_diagnostic_stream_reports_unchanged() {
    let dir = temp_dir("empty_stream");
    let input = write_file(&dir, "prog.c", b"int x;");
    let diags = write_file(&dir, "diags.json", b"[]");
    let code = run(args(input, diags)).unwrap();
    assert_eq!(code, 0);
    assert!(!dir.join("prog.fixit.c").exists());
    fs::remove_dir_all(&dir).ok();
}

// ---------- Ordering ----------

#[test]
fn emission_order_is_first_applied_wins() {
    let dir = temp_dir("ordering");
    let input = write_file(&dir, "prog.c", b"aaaa");
    // Both diagnostics target [1, 3); only the first lands, and the run
    // is marked failed, so nothing is written.
    let diags = write_file(
        &dir,
        "diags.json",
        br#"[
            { "severity": "warning", "message": "first",
              "hints": [{ "range": { "begin": 1, "end": 3 }, "text": "B" }] },
            { "severity": "warning", "message": "second",
              "hints": [{ "range": { "begin": 1, "end": 3 }, "text": "C" }] }
        ]"#,
    );

    let code = run(args(input, diags)).unwrap();
    assert_eq!(code, 1);
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn hints_within_a_diagnostic_apply_in_order() {
    let dir = temp_dir("hint_order");
    let input = write_file(&dir, "prog.c", b"f(a, b);");
    let diags = write_file(
        &dir,
        "diags.json",
        br#"[{ "severity": "warning", "message": "swap args",
              "hints": [
                { "range": { "begin": 2, "end": 3 }, "text": "b" },
                { "range": { "begin": 5, "end": 6 }, "text": "a" }
              ] }]"#,
    );

    let code = run(args(input, diags)).unwrap();
    assert_eq!(code, 0);
    assert_eq!(fs::read(dir.join("prog.fixit.c")).unwrap(), b"f(b, a);");
    fs::remove_dir_all(&dir).ok();
}
