//! Output formatting for replacement summaries.

pub mod json;
pub mod text;

use std::path::PathBuf;

use serde::Serialize;

use crate::replacer::Strategy;

/// Outcome of rewriting (or previewing) one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub strategy: Strategy,
    /// Number of mappings applied.
    pub mappings: usize,
    pub original_size: u64,
    /// Size after replacement, `None` when the file failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_size: Option<u64>,
    /// Bytes committed across all passes, including partial work on failure.
    pub bytes_written: u64,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Every file report of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub passed: bool,
    pub files: Vec<FileReport>,
}

impl Summary {
    pub fn new(files: Vec<FileReport>) -> Self {
        let passed = files.iter().all(FileReport::passed);
        Self { passed, files }
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| !f.passed()).count()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
