// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming literal substitution over any `Read` source.
//!
//! [`SubstitutingReader`] scans its upstream for one literal pattern and
//! yields the replacement in place of every match. Matches are leftmost
//! and non-overlapping: after a match, scanning resumes right after it;
//! after a mismatch, scanning resumes one byte later. A match that
//! straddles two upstream reads is still found, because bytes that could
//! be the start of a match are carried over to the next read.
//!
//! Upstream bytes are pulled in chunks and searched with
//! `memchr::memmem`, so the per-byte cost stays close to a plain copy.

use std::io::{self, Read};

use memchr::memmem::Finder;

use crate::error::{Error, Result};

/// Default number of bytes pulled from upstream per read (8KB).
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// A `Read` adapter that replaces one literal byte pattern on the fly.
pub struct SubstitutingReader<R> {
    upstream: R,
    finder: Finder<'static>,
    replacement: Vec<u8>,
    /// Carry-over between reads: a strict prefix of the pattern, shorter
    /// than the pattern. Grows by one chunk while a read is being scanned.
    window: Vec<u8>,
    /// Output produced but not yet handed to the caller.
    pending: Vec<u8>,
    pending_pos: usize,
    chunk_size: usize,
    eof: bool,
}

impl<R: Read> SubstitutingReader<R> {
    /// Create a reader replacing `pattern` with `replacement`.
    ///
    /// Returns `Err(InvalidMapping)` if `pattern` is empty.
    pub fn new(upstream: R, pattern: &[u8], replacement: &[u8]) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::InvalidMapping);
        }

        Ok(Self {
            upstream,
            finder: Finder::new(pattern).into_owned(),
            replacement: replacement.to_vec(),
            window: Vec::new(),
            pending: Vec::new(),
            pending_pos: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            eof: false,
        })
    }

    /// Set how many bytes are requested from upstream per read.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Rebind to a new upstream and mapping, dropping all buffered state.
    ///
    /// Buffers keep their capacity, so one reader can serve a whole
    /// sequence of passes.
    pub fn reset(&mut self, upstream: R, pattern: &[u8], replacement: &[u8]) -> Result<()> {
        if pattern.is_empty() {
            return Err(Error::InvalidMapping);
        }

        self.upstream = upstream;
        self.finder = Finder::new(pattern).into_owned();
        self.replacement.clear();
        self.replacement.extend_from_slice(replacement);
        self.window.clear();
        self.pending.clear();
        self.pending_pos = 0;
        self.eof = false;
        Ok(())
    }

    pub fn pattern(&self) -> &[u8] {
        self.finder.needle()
    }

    pub fn replacement(&self) -> &[u8] {
        &self.replacement
    }

    /// Bytes held back as a possible start of a match.
    pub fn carry_over(&self) -> &[u8] {
        &self.window
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn get_ref(&self) -> &R {
        &self.upstream
    }

    /// Unwrap the upstream source. Buffered bytes are lost.
    pub fn into_inner(self) -> R {
        self.upstream
    }

    /// Pull one chunk from upstream and scan it.
    fn fill(&mut self) -> io::Result<()> {
        let carried = self.window.len();
        self.window.resize(carried + self.chunk_size, 0);

        let read = match self.upstream.read(&mut self.window[carried..]) {
            Ok(n) => n,
            Err(e) => {
                self.window.truncate(carried);
                return Err(e);
            }
        };
        self.window.truncate(carried + read);

        if read == 0 {
            // Upstream exhausted: an unresolved partial match is literal text.
            self.eof = true;
            self.pending.append(&mut self.window);
            return Ok(());
        }

        self.scan();
        Ok(())
    }

    /// Move everything in the window that is resolved into `pending`.
    fn scan(&mut self) {
        let pattern_len = self.finder.needle().len();
        let mut start = 0;

        while let Some(offset) = self.finder.find(&self.window[start..]) {
            let at = start + offset;
            self.pending.extend_from_slice(&self.window[start..at]);
            self.pending.extend_from_slice(&self.replacement);
            start = at + pattern_len;
        }

        let keep = partial_match_len(&self.window[start..], self.finder.needle());
        let resolved = self.window.len() - keep;
        self.pending.extend_from_slice(&self.window[start..resolved]);
        self.window.drain(..resolved);
    }
}

impl<R: Read> Read for SubstitutingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        while self.pending_pos == self.pending.len() {
            self.pending.clear();
            self.pending_pos = 0;
            if self.eof {
                return Ok(0);
            }
            self.fill()?;
        }

        let available = &self.pending[self.pending_pos..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pending_pos += n;
        Ok(n)
    }
}

/// Length of the longest suffix of `tail` that is a strict prefix of
/// `pattern`. `tail` must not contain a full match.
fn partial_match_len(tail: &[u8], pattern: &[u8]) -> usize {
    let max = tail.len().min(pattern.len() - 1);
    (1..=max)
        .rev()
        .find(|&k| tail.ends_with(&pattern[..k]))
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "substitute_tests.rs"]
mod tests;
