//! JSON output formatter.
//!
//! ```json
//! {
//!   "passed": true,
//!   "files": [
//!     {
//!       "path": "notes.txt",
//!       "strategy": "chained",
//!       "mappings": 2,
//!       "original_size": 120,
//!       "final_size": 98,
//!       "bytes_written": 98,
//!       "dry_run": false
//!     }
//!   ]
//! }
//! ```

use std::io::Write;

use super::Summary;

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete JSON output.
    pub fn write(&mut self, summary: &Summary) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(summary).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
