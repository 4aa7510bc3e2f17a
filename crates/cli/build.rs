// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build script that generates env var name constants for `env.rs`.

// Build scripts panic on failure, there is no meaningful recovery.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let dest = Path::new(&out_dir).join("env_names.rs");

    let contents = r#"
/// Environment variable: path to a config file (same as `--config`).
pub const BYTESED_CONFIG: &str = "BYTESED_CONFIG";
/// Environment variable: enables debug/verbose output.
pub const BYTESED_DEBUG: &str = "BYTESED_DEBUG";
/// Environment variable: configures tracing log filter.
pub const BYTESED_LOG: &str = "BYTESED_LOG";
"#;

    fs::write(dest, contents).expect("failed to write env_names.rs");
}
