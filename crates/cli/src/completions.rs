// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion scripts for bytesed.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;

/// Binary name completions are registered for.
const BIN_NAME: &str = "bytesed";

/// Write the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
}

/// Conventional file name for an installed completion script.
pub fn script_filename(shell: Shell) -> String {
    match shell {
        Shell::Bash => format!("{BIN_NAME}.bash"),
        Shell::Zsh => format!("_{BIN_NAME}"),
        Shell::Fish => format!("{BIN_NAME}.fish"),
        Shell::PowerShell => format!("_{BIN_NAME}.ps1"),
        Shell::Elvish => format!("{BIN_NAME}.elv"),
        _ => BIN_NAME.to_string(),
    }
}

#[cfg(test)]
#[path = "completions_tests.rs"]
mod tests;
