// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scratch files for replace passes.
//!
//! A scratch file lives in the same directory as the working file, so the
//! final rename never crosses file systems. It is named
//! `tmp-<prefix>-<random>` and created exclusively, so concurrent or rapid
//! passes never collide. Committing renames it over the working file in
//! one step; dropping it uncommitted deletes it.

use std::fs::Permissions;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Scratch file name prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "bytesed";

/// Output of one replace pass, pending rename over its target.
#[derive(Debug)]
pub struct ScratchFile {
    file: NamedTempFile,
    target: PathBuf,
}

impl ScratchFile {
    /// Create a scratch file beside `target` carrying `permissions`.
    ///
    /// Fails with `Argument` when `prefix` contains a path separator.
    pub fn create(target: &Path, prefix: &str, permissions: &Permissions) -> Result<Self> {
        if has_separator(prefix) {
            return Err(Error::Argument(format!(
                "scratch prefix must not contain a path separator: {prefix:?}"
            )));
        }

        let dir = parent_dir(target);
        let prefix = format!("tmp-{prefix}-");

        let file = tempfile::Builder::new()
            .prefix(&prefix)
            .tempfile_in(dir)
            .map_err(|e| Error::io(dir, e))?;

        file.as_file()
            .set_permissions(permissions.clone())
            .map_err(|e| Error::io(file.path(), e))?;

        tracing::debug!(scratch = %file.path().display(), "created scratch file");
        Ok(Self {
            file,
            target: target.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Copy `reader` to the scratch file, returning the bytes written.
    ///
    /// Errors from either side of the copy are reported against the
    /// working file.
    pub fn fill_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<u64> {
        let mut writer = BufWriter::new(self.file.as_file_mut());
        let written = io::copy(reader, &mut writer).map_err(|e| Error::io(&self.target, e))?;
        writer.flush().map_err(|e| Error::io(&self.target, e))?;
        drop(writer);

        self.file
            .as_file()
            .sync_data()
            .map_err(|e| Error::io(&self.target, e))?;
        Ok(written)
    }

    /// Atomically replace the target with this file.
    pub fn commit(self) -> Result<()> {
        let target = self.target;
        self.file
            .persist(&target)
            .map_err(|e| Error::io(&target, e.error))?;

        tracing::debug!(path = %target.display(), "replaced working file");
        Ok(())
    }
}

/// True when `prefix` would place a scratch file outside the target's
/// directory.
pub(crate) fn has_separator(prefix: &str) -> bool {
    prefix.chars().any(std::path::is_separator)
}

/// Directory holding `path`, `.` for bare file names.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
#[path = "scratch_tests.rs"]
mod tests;
