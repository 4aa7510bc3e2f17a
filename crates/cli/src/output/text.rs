//! Text output formatter.
//!
//! One line per file:
//! ```text
//! notes.txt: 120 -> 98 bytes (chained, 2 mappings)
//! notes.txt: 120 -> 98 bytes (dry-run, chained, 2 mappings)
//! notes.txt: error: failed to open notes.txt: permission denied
//! ```

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::{FileReport, Summary};
use crate::color::scheme;

/// Text output formatter with color support.
pub struct TextFormatter<W> {
    writer: W,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(color_choice))
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a single file line.
    pub fn write_report(&mut self, report: &FileReport) -> std::io::Result<()> {
        self.writer.set_color(&scheme::path())?;
        write!(self.writer, "{}", report.path.display())?;
        self.writer.reset()?;
        write!(self.writer, ": ")?;

        if let Some(error) = &report.error {
            self.writer.set_color(&scheme::error())?;
            write!(self.writer, "error")?;
            self.writer.reset()?;
            return writeln!(self.writer, ": {}", error);
        }

        let final_size = report.final_size.unwrap_or(report.original_size);
        self.writer.set_color(&scheme::sizes())?;
        write!(self.writer, "{} -> {}", report.original_size, final_size)?;
        self.writer.reset()?;
        write!(self.writer, " bytes (")?;

        if report.dry_run {
            self.writer.set_color(&scheme::dry_run())?;
            write!(self.writer, "dry-run")?;
            self.writer.reset()?;
            write!(self.writer, ", ")?;
        }

        writeln!(
            self.writer,
            "{}, {} {})",
            report.strategy,
            report.mappings,
            if report.mappings == 1 { "mapping" } else { "mappings" }
        )
    }

    /// Write every file line, then a failure count when anything failed.
    pub fn write(&mut self, summary: &Summary) -> std::io::Result<()> {
        for report in &summary.files {
            self.write_report(report)?;
        }

        let failed = summary.failed();
        if failed > 0 {
            writeln!(
                self.writer,
                "{} of {} files failed",
                failed,
                summary.files.len()
            )?;
        }
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
