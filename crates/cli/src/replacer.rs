// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-place replacement engines.
//!
//! A [`Replacer`] owns one working file and a [`MappingTable`]. Two
//! strategies apply the table:
//!
//! - **Sequential**: one scratch-and-rename pass per mapping. Only one
//!   reader's buffers are alive at a time; I/O grows with the mapping
//!   count. A failure keeps the passes already committed.
//! - **Chained**: one pass through a [`ReaderChain`] of every mapping.
//!   I/O is a single copy of the file; buffers for every layer are alive
//!   at once. A failure leaves the working file untouched.
//!
//! Both strategies apply mappings in registration order, each seeing the
//! output of the previous one, so they always produce identical bytes.

use std::fs::{File, OpenOptions, Permissions};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chain::ReaderChain;
use crate::error::{Error, ReplaceError, Result};
use crate::mapping::{Mapping, MappingTable};
use crate::scratch::{DEFAULT_PREFIX, ScratchFile};
use crate::substitute::{DEFAULT_CHUNK_SIZE, SubstitutingReader};

/// Size at which to log a large working file (64MB).
pub const LARGE_FILE_INFO: u64 = 64 * 1024 * 1024;

/// How a mapping table is applied to the working file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// One pass per mapping.
    Sequential,
    /// One pass for all mappings.
    #[default]
    Chained,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Chained => "chained",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables for a [`Replacer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacerOptions {
    /// Bytes pulled from upstream per read, for the file and every layer.
    pub chunk_size: usize,
    /// Scratch files are named `tmp-<scratch_prefix>-<random>`.
    pub scratch_prefix: String,
}

impl Default for ReplacerOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            scratch_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// Rewrites one file in place according to registered mappings.
#[derive(Debug)]
pub struct Replacer {
    file: File,
    path: PathBuf,
    size: u64,
    permissions: Permissions,
    mappings: MappingTable,
    options: ReplacerOptions,
    /// Fail after creating the scratch file of this pass.
    #[cfg(test)]
    fail_scratch: Option<usize>,
}

impl Replacer {
    /// Open `path` read-write with default options.
    ///
    /// Returns `Err(File)` if the file is missing or not writable.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, ReplacerOptions::default())
    }

    /// Open `path` read-write with custom options.
    pub fn open_with(path: impl AsRef<Path>, options: ReplacerOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (file, size, permissions) = open_working(&path)?;

        if size > LARGE_FILE_INFO {
            tracing::info!(
                path = %path.display(),
                size_mb = size as f64 / 1_000_000.0,
                "opened large working file"
            );
        }

        Ok(Self {
            file,
            path,
            size,
            permissions,
            mappings: MappingTable::new(),
            options,
            #[cfg(test)]
            fail_scratch: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the working file as of the last open or replace.
    pub fn file_size(&self) -> u64 {
        self.size
    }

    /// Permission bits of the working file as of the last open or replace.
    pub fn permissions(&self) -> &Permissions {
        &self.permissions
    }

    pub fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    pub fn options(&self) -> &ReplacerOptions {
        &self.options
    }

    /// The open working file handle.
    pub fn file(&self) -> &File {
        &self.file
    }

    /// Register `old -> new`. Fails with `InvalidMapping` for an empty `old`.
    pub fn add_mapping(&mut self, old: impl Into<Vec<u8>>, new: impl Into<Vec<u8>>) -> Result<()> {
        self.mappings.add(old, new)
    }

    /// Register `old -> new` from strings.
    pub fn add_str_mapping(&mut self, old: &str, new: &str) -> Result<()> {
        self.mappings.add_str(old, new)
    }

    /// Apply the mapping table with `strategy`.
    pub fn replace(&mut self, strategy: Strategy) -> std::result::Result<u64, ReplaceError> {
        match strategy {
            Strategy::Sequential => self.replace_sequential(),
            Strategy::Chained => self.replace_chained(),
        }
    }

    /// Apply each mapping with its own scratch-and-rename pass.
    ///
    /// Returns the bytes written across all passes. On failure, passes
    /// already committed stay committed, the error carries their byte
    /// count, and the mapping table is kept.
    pub fn replace_sequential(&mut self) -> std::result::Result<u64, ReplaceError> {
        if self.mappings.is_empty() {
            return Err(Error::NoMappings.into());
        }

        let mut mappings = std::mem::take(&mut self.mappings);
        let result = self.run_sequential(&mappings);

        // The table is only consumed when every pass succeeded.
        if result.is_ok() {
            mappings.clear();
        }
        self.mappings = mappings;
        result
    }

    fn run_sequential(&mut self, mappings: &MappingTable) -> std::result::Result<u64, ReplaceError> {
        let mut total = 0u64;
        let mut reader: Option<SubstitutingReader<BufReader<File>>> = None;

        for (index, mapping) in mappings.iter().enumerate() {
            let _span = tracing::debug_span!("pass", index).entered();

            let written = self
                .sequential_pass(index, &mut reader, mapping)
                .map_err(|e| ReplaceError::new(total, e))?;
            total += written;
            tracing::debug!(written, total, "pass committed");

            self.refresh().map_err(|e| ReplaceError::new(total, e))?;
        }

        Ok(total)
    }

    /// One sequential pass, reusing the reader left in `slot` if any.
    fn sequential_pass(
        &self,
        index: usize,
        slot: &mut Option<SubstitutingReader<BufReader<File>>>,
        mapping: Mapping<'_>,
    ) -> Result<u64> {
        let input = self.open_input()?;
        let reader = match slot.take() {
            Some(mut reader) => {
                reader.reset(input, mapping.old, mapping.new)?;
                reader
            }
            None => SubstitutingReader::new(input, mapping.old, mapping.new)?
                .with_chunk_size(self.options.chunk_size),
        };
        let reader = slot.insert(reader);

        let mut scratch = self.create_scratch(index)?;
        let written = scratch.fill_from(reader)?;
        scratch.commit()?;
        Ok(written)
    }

    /// Apply every mapping in a single pass through a reader chain.
    ///
    /// On failure the working file is untouched, the scratch file is
    /// removed, and the mapping table is kept.
    pub fn replace_chained(&mut self) -> std::result::Result<u64, ReplaceError> {
        if self.mappings.is_empty() {
            return Err(Error::NoMappings.into());
        }

        let written = {
            let input = self.open_input()?;
            let mut chain = ReaderChain::build_with_chunk_size(
                input,
                &self.mappings,
                self.options.chunk_size,
            )?;
            let _span = tracing::debug_span!("chain", depth = chain.depth()).entered();

            let mut scratch = self.create_scratch(0)?;
            let written = scratch.fill_from(&mut chain)?;
            scratch.commit()?;
            written
        };

        tracing::debug!(written, "chained pass committed");
        self.size = written;
        self.refresh().map_err(|e| ReplaceError::new(written, e))?;
        self.mappings.clear();
        Ok(written)
    }

    /// Size the working file would have after replacing, without
    /// touching the file or the mapping table.
    ///
    /// Both strategies produce the same bytes, so one chained pass into a
    /// sink answers for either.
    pub fn preview(&self) -> Result<u64> {
        let input = self.open_input()?;
        let mut chain =
            ReaderChain::build_with_chunk_size(input, &self.mappings, self.options.chunk_size)?;
        io::copy(&mut chain, &mut io::sink()).map_err(|e| Error::io(&self.path, e))
    }

    /// Close and reopen the working file and clear the mapping table.
    pub fn reset(&mut self) -> Result<()> {
        self.refresh()?;
        self.mappings.clear();
        Ok(())
    }

    /// Reopen the working file and re-read its size and permissions.
    fn refresh(&mut self) -> Result<()> {
        let (file, size, permissions) = open_working(&self.path)?;
        // Assigning drops the previous handle.
        self.file = file;
        self.size = size;
        self.permissions = permissions;
        Ok(())
    }

    fn open_input(&self) -> Result<BufReader<File>> {
        let file = File::open(&self.path).map_err(|e| Error::io(&self.path, e))?;
        Ok(BufReader::with_capacity(self.options.chunk_size, file))
    }

    #[cfg_attr(not(test), allow(unused_variables))]
    fn create_scratch(&self, pass: usize) -> Result<ScratchFile> {
        let scratch =
            ScratchFile::create(&self.path, &self.options.scratch_prefix, &self.permissions)?;

        #[cfg(test)]
        if self.fail_scratch == Some(pass) {
            return Err(Error::io(&self.path, io::Error::other("scratch failure")));
        }

        Ok(scratch)
    }
}

/// Open `path` read-write, returning the handle, size and permissions.
fn open_working(path: &Path) -> Result<(File, u64, Permissions)> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| Error::file(path, e))?;
    let metadata = file.metadata().map_err(|e| Error::file(path, e))?;
    Ok((file, metadata.len(), metadata.permissions()))
}

#[cfg(test)]
#[path = "replacer_tests.rs"]
mod tests;
