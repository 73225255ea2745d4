//! End-to-End Tests for The Focus Study CLI.
//!
//! These tests run the compiled binary for the non-interactive paths:
//! - Help and version output
//! - Shell completion generation
//! - The playlist catalog (text and JSON)
//! - Rejection of out-of-range or malformed initial settings
//!
//! The interactive timer itself needs a terminal and is covered by the
//! in-process tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn focus_study() -> Command {
    let mut cmd = Command::cargo_bin("focus-study").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn test_help_lists_options() {
    focus_study()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--focus"))
        .stdout(predicate::str::contains("--short-break"))
        .stdout(predicate::str::contains("--long-break"))
        .stdout(predicate::str::contains("--sound"))
        .stdout(predicate::str::contains("playlists"));
}

#[test]
fn test_version() {
    focus_study()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("focus-study "));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_bash_completions() {
    focus_study()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("focus-study"));
}

#[test]
fn test_unknown_shell_rejected() {
    focus_study()
        .args(["completions", "cmd"])
        .assert()
        .failure();
}

// ============================================================================
// Playlists
// ============================================================================

#[test]
fn test_playlists_text() {
    focus_study()
        .arg("playlists")
        .assert()
        .success()
        .stdout(predicate::str::contains("Focus Deep (focus-deep)"))
        .stdout(predicate::str::contains("Lofi Deep (lofi-deep)"))
        .stdout(predicate::str::contains("Brain Food"));
}

#[test]
fn test_playlists_json() {
    let output = focus_study()
        .args(["playlists", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let categories = json.as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["id"], "focus-deep");
    assert_eq!(categories[0]["playlists"][0]["name"], "Focus Flow");
    assert_eq!(categories[1]["playlists"].as_array().unwrap().len(), 4);
}

// ============================================================================
// Invalid Settings
// ============================================================================

#[test]
fn test_focus_out_of_range() {
    focus_study()
        .args(["--focus", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--focus"));

    focus_study().args(["--focus", "61"]).assert().failure();
}

#[test]
fn test_short_break_out_of_range() {
    focus_study()
        .args(["--short-break", "31"])
        .assert()
        .failure();
}

#[test]
fn test_unknown_sound() {
    focus_study()
        .args(["--sound", "gong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gong"));
}

#[test]
fn test_malformed_color() {
    focus_study()
        .args(["--background", "blue"])
        .assert()
        .failure();
}

#[test]
fn test_missing_background_image() {
    focus_study()
        .args(["--background-image", "/nonexistent/bg.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("background image not found"));
}
