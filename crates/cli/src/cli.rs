// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::replacer::Strategy;

/// Streaming, in-place byte sequence substitution for files
#[derive(Parser)]
#[command(name = "bytesed")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "BYTESED_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replace byte sequences in files, in place
    Replace(ReplaceArgs),
    /// Print a shell completion script
    Completions(CompletionsArgs),
}

#[derive(clap::Args)]
pub struct ReplaceArgs {
    /// Files to rewrite
    #[arg(value_name = "FILE", required = true)]
    pub paths: Vec<PathBuf>,

    /// Replace OLD with NEW (repeatable, applied in order)
    #[arg(
        short = 'm',
        long = "map",
        num_args = 2,
        value_names = ["OLD", "NEW"],
        allow_hyphen_values = true
    )]
    pub maps: Vec<String>,

    /// Decode backslash escapes (\n, \t, \xHH, ...) in OLD and NEW
    #[arg(short = 'e', long)]
    pub escapes: bool,

    /// Replacement strategy (default: from config, else chained)
    #[arg(short = 's', long)]
    pub strategy: Option<Strategy>,

    /// Bytes read per chunk
    #[arg(long, value_name = "BYTES", value_parser = clap::value_parser!(u64).range(1..))]
    pub chunk_size: Option<u64>,

    /// Report resulting sizes without modifying files
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl ReplaceArgs {
    /// `(OLD, NEW)` pairs from `--map`, in command-line order.
    pub fn map_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.maps
            .chunks_exact(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

#[derive(clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: clap_complete::Shell,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
