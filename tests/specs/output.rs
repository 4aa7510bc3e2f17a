// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for output formats and diagnostics.

use crate::prelude::*;

// =============================================================================
// TEXT FORMAT SPECS
// =============================================================================

#[test]
fn text_reports_sizes_per_file() {
    let temp = Project::empty();
    temp.file("a.txt", "foo foo");
    temp.file("b.txt", "nothing");

    replace()
        .pwd(temp.path())
        .map("foo", "quux")
        .map("nothing", "")
        .file("a.txt")
        .file("b.txt")
        .passes()
        .stdout_eq(
            "a.txt: 7 -> 9 bytes (chained, 2 mappings)\n\
             b.txt: 7 -> 0 bytes (chained, 2 mappings)\n",
        );
}

#[test]
fn no_color_when_piped() {
    let temp = Project::empty();
    temp.file("a.txt", "foo");

    replace()
        .pwd(temp.path())
        .map("foo", "bar")
        .file("a.txt")
        .passes()
        .stdout_lacks("\x1b[");
}

#[test]
fn color_env_forces_color() {
    let temp = Project::empty();
    temp.file("a.txt", "foo");

    replace()
        .pwd(temp.path())
        .map("foo", "bar")
        .file("a.txt")
        .env("COLOR", "1")
        .passes()
        .stdout_has("\x1b[");
}

#[test]
fn no_color_env_wins_over_color() {
    let temp = Project::empty();
    temp.file("a.txt", "foo");

    replace()
        .pwd(temp.path())
        .map("foo", "bar")
        .file("a.txt")
        .env("COLOR", "1")
        .env("NO_COLOR", "1")
        .passes()
        .stdout_lacks("\x1b[");
}

// =============================================================================
// JSON FORMAT SPECS
// =============================================================================

#[test]
fn json_reports_every_file() {
    let temp = Project::empty();
    temp.file("a.txt", "foo foo");

    let json = replace()
        .pwd(temp.path())
        .map("foo", "quux")
        .file("a.txt")
        .args(&["-s", "sequential"])
        .json()
        .passes();

    assert!(json.passed());
    let file = json.require_file("a.txt");
    assert_eq!(file["strategy"], "sequential");
    assert_eq!(file["mappings"], 1);
    assert_eq!(file["original_size"], 7);
    assert_eq!(file["final_size"], 9);
    assert_eq!(file["bytes_written"], 9);
    assert_eq!(file["dry_run"], false);
    assert!(file.get("error").is_none());
}

#[test]
fn json_sequential_counts_bytes_across_passes() {
    let temp = Project::empty();
    temp.file("a.txt", "abc");

    let json = replace()
        .pwd(temp.path())
        .map("a", "x")
        .map("b", "y")
        .file("a.txt")
        .args(&["-s", "sequential"])
        .json()
        .passes();

    let file = json.require_file("a.txt");
    assert_eq!(file["final_size"], 3);
    assert_eq!(file["bytes_written"], 6);
}

#[test]
fn json_failed_file_has_error() {
    let temp = Project::empty();

    let json = replace()
        .pwd(temp.path())
        .map("foo", "bar")
        .file("missing.txt")
        .json()
        .exits(3);

    assert!(!json.passed());
    let file = json.require_file("missing.txt");
    assert!(file["error"].as_str().unwrap().contains("missing.txt"));
    assert!(file.get("final_size").is_none());
}

#[test]
fn json_dry_run_reports_projected_size() {
    let temp = Project::empty();
    temp.file("a.txt", "foo");

    let json = replace()
        .pwd(temp.path())
        .map("foo", "")
        .file("a.txt")
        .args(&["--dry-run"])
        .json()
        .passes();

    let file = json.require_file("a.txt");
    assert_eq!(file["dry_run"], true);
    assert_eq!(file["final_size"], 0);
    assert_eq!(file["bytes_written"], 0);
    assert_eq!(temp.read("a.txt"), b"foo");
}

// =============================================================================
// DIAGNOSTICS SPECS
// =============================================================================

#[test]
fn verbose_lists_mappings_on_stderr() {
    let temp = Project::empty();
    temp.file("a.txt", "foo");

    replace()
        .pwd(temp.path())
        .map("foo", "bar")
        .file("a.txt")
        .args(&["-v"])
        .passes()
        .stderr_has("[verbose] === Mappings ===")
        .stderr_has("[verbose] #1: \"foo\" -> \"bar\"")
        .stderr_has("[verbose] strategy: chained");
}

#[test]
fn debug_env_enables_verbose() {
    let temp = Project::empty();
    temp.file("a.txt", "foo");

    replace()
        .pwd(temp.path())
        .map("foo", "bar")
        .file("a.txt")
        .env("BYTESED_DEBUG", "1")
        .passes()
        .stderr_has("[verbose]");
}

#[test]
fn log_env_enables_debug_events() {
    let temp = Project::empty();
    temp.file("a.txt", "foo");

    replace()
        .pwd(temp.path())
        .map("foo", "bar")
        .file("a.txt")
        .env("BYTESED_LOG", "debug")
        .passes()
        .stderr_has("DEBUG");
}
