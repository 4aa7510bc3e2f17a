// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replace command implementation.

use std::path::Path;

use bytesed::cli::{Cli, OutputFormat, ReplaceArgs};
use bytesed::color::resolve_color;
use bytesed::config::{self, CONFIG_FILE_NAME, Config};
use bytesed::discovery;
use bytesed::env;
use bytesed::error::{Error, ExitCode, ReplaceError};
use bytesed::escape::unescape;
use bytesed::mapping::MappingTable;
use bytesed::output::json::JsonFormatter;
use bytesed::output::text::TextFormatter;
use bytesed::output::{FileReport, Summary};
use bytesed::replacer::{Replacer, ReplacerOptions, Strategy};
use bytesed::verbose::VerboseLogger;

/// Run the replace command.
pub fn run(cli: &Cli, args: &ReplaceArgs) -> anyhow::Result<ExitCode> {
    let verbose = VerboseLogger::new(args.verbose || env::debug_enabled());

    let cwd = std::env::current_dir()?;
    let config = match discovery::resolve_config(cli.config.as_deref(), &cwd)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            verbose.log(&format!("config: {}", path.display()));
            config::load_with_warnings(&path)?
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Config::default()
        }
    };

    let mappings = collect_mappings(&config, args)?;
    if mappings.is_empty() {
        eprintln!("bytesed: no mappings given");
        eprintln!(
            "  Use -m/--map OLD NEW, or add [[mapping]] entries to {}.",
            CONFIG_FILE_NAME
        );
        return Ok(ExitCode::ConfigError);
    }

    let strategy = args.strategy.unwrap_or(config.replace.strategy);
    let mut options = config.replace.options();
    if let Some(chunk_size) = args.chunk_size {
        options.chunk_size = usize::try_from(chunk_size)
            .map_err(|_| Error::Argument(format!("chunk size too large: {}", chunk_size)))?;
    }

    if verbose.is_enabled() {
        verbose.section("Mappings");
        for (index, mapping) in mappings.iter().enumerate() {
            verbose.mapping(index, mapping);
        }
        verbose.log(&format!(
            "strategy: {}, chunk size: {}, scratch prefix: {}",
            strategy, options.chunk_size, options.scratch_prefix
        ));
    }

    let mut exit_code = ExitCode::Success;
    let mut reports = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let mut report = FileReport {
            path: path.clone(),
            strategy,
            mappings: mappings.len(),
            original_size: 0,
            final_size: None,
            bytes_written: 0,
            dry_run: args.dry_run,
            error: None,
        };

        if let Err(e) = replace_file(path, &mappings, strategy, &options, &mut report) {
            tracing::debug!(path = %path.display(), error = %e, "replace failed");
            if exit_code == ExitCode::Success {
                exit_code = ExitCode::from(&e);
            }
            report.error = Some(e.source.to_string());
        }

        verbose.log(&format!(
            "{}: {} bytes written",
            path.display(),
            report.bytes_written
        ));
        reports.push(report);
    }

    let summary = Summary::new(reports);
    match args.output {
        OutputFormat::Text => TextFormatter::stdout(resolve_color()).write(&summary)?,
        OutputFormat::Json => JsonFormatter::new(std::io::stdout()).write(&summary)?,
    }

    Ok(exit_code)
}

/// Config mappings first, then `--map` pairs in command-line order.
fn collect_mappings(config: &Config, args: &ReplaceArgs) -> bytesed::Result<MappingTable> {
    let mut mappings = config.mapping_table()?;
    for (old, new) in args.map_pairs() {
        if args.escapes {
            mappings.add(unescape(old)?, unescape(new)?)?;
        } else {
            mappings.add_str(old, new)?;
        }
    }
    Ok(mappings)
}

/// Rewrite (or preview) one file, filling in `report` as work completes.
fn replace_file(
    path: &Path,
    mappings: &MappingTable,
    strategy: Strategy,
    options: &ReplacerOptions,
    report: &mut FileReport,
) -> Result<(), ReplaceError> {
    let mut replacer = Replacer::open_with(path, options.clone())?;
    report.original_size = replacer.file_size();

    for mapping in mappings {
        replacer.add_mapping(mapping.old, mapping.new)?;
    }

    if report.dry_run {
        report.final_size = Some(replacer.preview()?);
        return Ok(());
    }

    match replacer.replace(strategy) {
        Ok(written) => {
            report.bytes_written = written;
            report.final_size = Some(replacer.file_size());
            Ok(())
        }
        Err(e) => {
            report.bytes_written = e.written;
            Err(e)
        }
    }
}
