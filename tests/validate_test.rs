//! Integration tests for the qrc-check binary
//!
//! Each test builds a throwaway project directory with a toonz.qrc manifest
//! and runs the binary from inside it, checking the exit code and output.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qrc-check"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run qrc-check")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write_manifest(dir: &Path, files: &[&str]) {
    let mut body = String::from("<!DOCTYPE RCC>\n");
    body.push_str("<RCC version=\"1.0\">\n<qresource prefix=\"/\">\n");
    for file in files {
        body.push_str(&format!("    <file>{}</file>\n", file));
    }
    body.push_str("</qresource>\n</RCC>\n");
    fs::write(dir.join("toonz.qrc"), body).unwrap();
}

fn touch(dir: &Path, relative: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

// =========================================================================
// Fatal manifest errors
// =========================================================================

#[test]
fn test_missing_manifest_exits_without_report() {
    let temp = TempDir::new().unwrap();
    let output = run_in(temp.path(), &[]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(text.contains("Error: QRC file not found at"));
    assert!(text.contains("toonz.qrc"));
    assert!(text.contains("Please run from the directory containing toonz.qrc"));
    assert!(!text.contains("QRC Validation Report"));
}

#[test]
fn test_malformed_manifest_exits_without_report() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("toonz.qrc"),
        "<RCC><qresource><file>a.png</qresource></RCC>",
    )
    .unwrap();

    let output = run_in(temp.path(), &[]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(text.contains("Error: Failed to parse"));
    assert!(text.contains("XML Parse Error:"));
    assert!(!text.contains("QRC Validation Report"));
}

// =========================================================================
// Validation outcomes
// =========================================================================

#[test]
fn test_empty_manifest_succeeds_with_warning() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), &[]);

    let output = run_in(temp.path(), &[]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("Warning: No files found in"));
    assert!(text.contains("Total files referenced: 0"));
    assert!(!text.contains("Missing Files"));
    assert!(!text.contains("Invalid Paths"));
}

#[test]
fn test_root_file_element_counts_as_empty_manifest() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("toonz.qrc"), "<file>gone.png</file>").unwrap();

    let output = run_in(temp.path(), &[]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("Warning: No files found in"));
    assert!(!text.contains("Missing Files"));
}

#[test]
fn test_latin1_manifest_validates() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "caf\u{e9}.png");
    fs::write(
        temp.path().join("toonz.qrc"),
        b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<RCC><file>caf\xe9.png</file></RCC>\n",
    )
    .unwrap();

    let output = run_in(temp.path(), &[]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("Total files referenced: 1"));
    assert!(text.contains("Status: All file paths are valid"));
}

#[test]
fn test_missing_file_reported_under_extension() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), &["assets/missing.png"]);

    let output = run_in(temp.path(), &[]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(text.contains("Debug info for first missing file:"));
    assert!(text.contains("Missing Files (1):"));
    assert!(text.contains("  .png:\n    - assets/missing.png"));
}

#[test]
fn test_double_slash_reported_as_invalid() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path(), &["a//b.ts"]);

    let output = run_in(temp.path(), &[]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(text.contains("Invalid Paths (1):\n  - a//b.ts (Contains double slashes)"));
    assert!(!text.contains("Missing Files"));
    // Not checked on disk, so no first-miss diagnostics
    assert!(!text.contains("Debug info for first missing file:"));
}

#[test]
fn test_all_files_present_succeeds() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "Resources/toonz.png");
    touch(temp.path(), "qss/default/default.qss");
    touch(temp.path(), "LICENSE");
    write_manifest(
        temp.path(),
        &["Resources/toonz.png", "/qss/default/default.qss", "LICENSE"],
    );

    let output = run_in(temp.path(), &[]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("Total files referenced: 3"));
    assert!(text.contains("  (no extension): 1 files"));
    assert!(text.contains("  .png: 1 files"));
    assert!(text.contains("  .qss: 1 files"));
    assert_eq!(text.matches("Status: All file paths are valid").count(), 1);
}

#[test]
fn test_first_miss_diagnostics_printed_once() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "icons/present.svg");
    write_manifest(
        temp.path(),
        &["icons/present.svg", "icons/one.svg", "icons/two.svg"],
    );

    let output = run_in(temp.path(), &[]);
    let text = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(text.matches("Debug info for first missing file:").count(), 1);
    assert!(text.contains("File path from QRC: icons/one.svg"));
    assert!(text.contains("  - present.svg"));
    assert!(text.contains("Missing Files (2):"));
}

// =========================================================================
// Configuration flags
// =========================================================================

#[test]
fn test_base_dir_and_manifest_flags() {
    let project = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    touch(project.path(), "res/app.png");
    fs::write(
        project.path().join("app.qrc"),
        "<RCC><qresource><file>res/app.png</file></qresource></RCC>",
    )
    .unwrap();

    let base = project.path().to_string_lossy().into_owned();
    let output = run_in(
        elsewhere.path(),
        &["--base-dir", &base, "--manifest", "app.qrc"],
    );

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("app.qrc"));
}

#[test]
fn test_completions_subcommand() {
    let temp = TempDir::new().unwrap();
    let output = run_in(temp.path(), &["completions", "bash"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("qrc-check"));
}
