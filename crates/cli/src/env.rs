// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variables read by bytesed.

/// Generated environment variable names.
pub mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

/// Name of the variable holding the tracing filter.
pub fn bytesed_log_var() -> &'static str {
    names::BYTESED_LOG
}

/// Check if debug output is enabled via BYTESED_DEBUG.
pub fn debug_enabled() -> bool {
    std::env::var(names::BYTESED_DEBUG).is_ok_and(|v| is_truthy(&v))
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
