// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bytesed CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use bytesed::cli::{Cli, Command};
use bytesed::error::ExitCode;

mod cmd_replace;

fn init_logging() {
    let filter = EnvFilter::try_from_env(bytesed::env::bytesed_log_var())
        .unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("bytesed: {}", e);
            if let Some(err) = e.downcast_ref::<bytesed::Error>() {
                ExitCode::from(err)
            } else if let Some(err) = e.downcast_ref::<bytesed::ReplaceError>() {
                ExitCode::from(err)
            } else {
                ExitCode::InternalError
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Replace(args)) => cmd_replace::run(&cli, args),
        Some(Command::Completions(args)) => {
            bytesed::completions::write_completions(args.shell, &mut std::io::stdout());
            Ok(ExitCode::Success)
        }
    }
}
