// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbose output logger for diagnostic information.
//!
//! Writes `[verbose]` prefixed lines to stderr. Enabled with `--verbose`
//! or `BYTESED_DEBUG=1`.

use crate::mapping::Mapping;

/// Verbose output logger. Writes to stderr with a `[verbose]` prefix.
/// All output is conditional on verbose mode being enabled.
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Print a verbose line to stderr.
    pub fn log(&self, msg: &str) {
        if self.enabled {
            eprintln!("[verbose] {}", msg);
        }
    }

    /// Print a verbose section header.
    pub fn section(&self, title: &str) {
        if self.enabled {
            eprintln!("[verbose] === {} ===", title);
        }
    }

    /// Print one mapping, escaping non-printable bytes.
    pub fn mapping(&self, index: usize, mapping: Mapping<'_>) {
        if self.enabled {
            eprintln!("[verbose] {}", describe_mapping(index, mapping));
        }
    }
}

/// `#1: "foo" -> "bar"` with bytes shown as ASCII escapes.
pub fn describe_mapping(index: usize, mapping: Mapping<'_>) -> String {
    format!(
        "#{}: \"{}\" -> \"{}\"",
        index + 1,
        mapping.old.escape_ascii(),
        mapping.new.escape_ascii()
    )
}

#[cfg(test)]
#[path = "verbose_tests.rs"]
mod tests;
