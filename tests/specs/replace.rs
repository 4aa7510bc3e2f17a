// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for `bytesed replace`.
//!
//! - Rewrites files in place, mappings applied in order
//! - Both strategies produce identical bytes
//! - Failures are reported per file with exit codes
//! - No scratch files are left behind

use crate::prelude::*;

// =============================================================================
// REPLACEMENT SPECS
// =============================================================================

#[test]
fn replaces_in_place() {
    let temp = Project::empty();
    temp.file("notes.txt", "hello world, hello moon\n");

    replace()
        .pwd(temp.path())
        .map("hello", "bye")
        .file("notes.txt")
        .passes();

    assert_eq!(temp.read("notes.txt"), b"bye world, bye moon\n");
    assert_eq!(temp.entries(), vec!["notes.txt"]);
}

#[test]
fn mappings_apply_in_order() {
    let temp = Project::empty();
    temp.file("notes.txt", "a");

    // the second mapping sees the output of the first
    replace()
        .pwd(temp.path())
        .map("a", "b")
        .map("b", "c")
        .file("notes.txt")
        .passes();

    assert_eq!(temp.read("notes.txt"), b"c");
}

#[test]
fn strategies_produce_identical_bytes() {
    let content = "foo bar foo baz foofoo barbar\n".repeat(50);

    let mut results = Vec::new();
    for strategy in ["sequential", "chained"] {
        let temp = Project::empty();
        temp.file("data.txt", &content);

        replace()
            .pwd(temp.path())
            .map("foo", "bar")
            .map("barbar", "x")
            .map("baz", "")
            .file("data.txt")
            .args(&["-s", strategy, "--chunk-size", "3"])
            .passes();

        results.push(temp.read("data.txt"));
        assert_eq!(temp.entries(), vec!["data.txt"]);
    }

    assert_eq!(results[0], results[1]);
}

#[test]
fn overlapping_candidates_replace_leftmost() {
    let temp = Project::empty();
    temp.file("notes.txt", "aaaa");

    replace()
        .pwd(temp.path())
        .map("aa", "b")
        .file("notes.txt")
        .passes();

    assert_eq!(temp.read("notes.txt"), b"bb");
}

#[test]
fn trailing_partial_match_is_kept() {
    let temp = Project::empty();
    temp.file("notes.txt", "xab");

    replace()
        .pwd(temp.path())
        .map("abc", "Z")
        .file("notes.txt")
        .passes();

    assert_eq!(temp.read("notes.txt"), b"xab");
}

#[test]
fn match_straddling_chunks_is_replaced_once() {
    let temp = Project::empty();
    temp.file("notes.txt", "0123needle4567");

    replace()
        .pwd(temp.path())
        .map("needle", "pin")
        .file("notes.txt")
        .args(&["--chunk-size", "5"])
        .passes();

    assert_eq!(temp.read("notes.txt"), b"0123pin4567");
}

#[test]
fn empty_replacement_deletes() {
    let temp = Project::empty();
    temp.file("notes.txt", "a-b-c");

    replace()
        .pwd(temp.path())
        .map("-", "")
        .file("notes.txt")
        .passes();

    assert_eq!(temp.read("notes.txt"), b"abc");
}

#[test]
fn escapes_decode_binary_sequences() {
    let temp = Project::empty();
    temp.file("crlf.txt", b"one\r\ntwo\r\n\x00end");

    replace()
        .pwd(temp.path())
        .map(r"\r\n", r"\n")
        .map(r"\x00", r"\\0")
        .file("crlf.txt")
        .args(&["-e"])
        .passes();

    assert_eq!(temp.read("crlf.txt"), b"one\ntwo\n\\0end");
}

#[test]
fn without_escapes_backslashes_are_literal() {
    let temp = Project::empty();
    temp.file("notes.txt", r"C:\new\dir");

    replace()
        .pwd(temp.path())
        .map(r"\new", r"\old")
        .file("notes.txt")
        .passes();

    assert_eq!(temp.read("notes.txt"), br"C:\old\dir");
}

#[test]
fn map_values_may_look_like_flags() {
    let temp = Project::empty();
    temp.file("flags.txt", "--verbose -q");

    replace()
        .pwd(temp.path())
        .map("--verbose", "-v")
        .file("flags.txt")
        .passes();

    assert_eq!(temp.read("flags.txt"), b"-v -q");
}

#[test]
fn rewrites_every_file() {
    let temp = Project::empty();
    temp.file("a.txt", "foo");
    temp.file("b.txt", "foofoo");

    replace()
        .pwd(temp.path())
        .map("foo", "bar")
        .file("a.txt")
        .file("b.txt")
        .passes();

    assert_eq!(temp.read("a.txt"), b"bar");
    assert_eq!(temp.read("b.txt"), b"barbar");
}

#[cfg(unix)]
#[test]
fn preserves_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = Project::empty();
    temp.file("run.sh", "#!/bin/sh\necho foo\n");
    let path = temp.path().join("run.sh");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o750)).unwrap();

    replace()
        .pwd(temp.path())
        .map("foo", "bar")
        .file("run.sh")
        .passes();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o750);
}

// =============================================================================
// DRY-RUN SPECS
// =============================================================================

#[test]
fn dry_run_leaves_file_untouched() {
    let temp = Project::empty();
    temp.file("notes.txt", "hello hello");

    replace()
        .pwd(temp.path())
        .map("hello", "hi")
        .file("notes.txt")
        .args(&["--dry-run"])
        .passes()
        .stdout_eq("notes.txt: 11 -> 5 bytes (dry-run, chained, 1 mapping)\n");

    assert_eq!(temp.read("notes.txt"), b"hello hello");
    assert_eq!(temp.entries(), vec!["notes.txt"]);
}

// =============================================================================
// ERROR SPECS
// =============================================================================

#[test]
fn no_mappings_is_config_error() {
    let temp = Project::empty();
    temp.file("notes.txt", "abc");

    replace()
        .pwd(temp.path())
        .file("notes.txt")
        .exits(2)
        .stderr_has("no mappings");

    assert_eq!(temp.read("notes.txt"), b"abc");
}

#[test]
fn empty_old_is_config_error() {
    let temp = Project::empty();
    temp.file("notes.txt", "abc");

    replace()
        .pwd(temp.path())
        .map("", "x")
        .file("notes.txt")
        .exits(2)
        .stderr_has("empty");

    assert_eq!(temp.read("notes.txt"), b"abc");
}

#[test]
fn bad_escape_is_config_error() {
    let temp = Project::empty();
    temp.file("notes.txt", "abc");

    replace()
        .pwd(temp.path())
        .map(r"\q", "x")
        .file("notes.txt")
        .args(&["--escapes"])
        .exits(2)
        .stderr_has("invalid escape");
}

#[test]
fn missing_file_is_reported_and_others_still_rewritten() {
    let temp = Project::empty();
    temp.file("present.txt", "foo");

    replace()
        .pwd(temp.path())
        .map("foo", "bar")
        .file("missing.txt")
        .file("present.txt")
        .exits(3)
        .stdout_has("missing.txt: error: file error: missing.txt")
        .stdout_has("present.txt: 3 -> 3 bytes (chained, 1 mapping)")
        .stdout_has("1 of 2 files failed");

    assert_eq!(temp.read("present.txt"), b"bar");
    assert_eq!(temp.entries(), vec!["present.txt"]);
}

#[test]
fn directory_operand_fails_without_scratch_files() {
    let temp = Project::empty();
    std::fs::create_dir(temp.path().join("sub")).unwrap();

    replace()
        .pwd(temp.path())
        .map("a", "b")
        .file("sub")
        .exits(3);

    assert_eq!(temp.entries(), vec!["sub"]);
}
