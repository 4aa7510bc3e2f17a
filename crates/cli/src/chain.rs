// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Stacking substituting readers into a single pass.
//!
//! Layer 0 reads the raw source; layer `k` reads layer `k - 1`. The head
//! of the chain applies every mapping in registration order, so mapping
//! `k` sees the output of mapping `k - 1`, exactly as if each mapping had
//! been applied by its own pass.

use std::io::{self, Read};

use crate::error::{Error, Result};
use crate::mapping::MappingTable;
use crate::substitute::{DEFAULT_CHUNK_SIZE, SubstitutingReader};

type Layer<'a> = SubstitutingReader<Box<dyn Read + 'a>>;

/// A stack of [`SubstitutingReader`]s behaving as one `Read` source.
pub struct ReaderChain<'a> {
    head: Layer<'a>,
    depth: usize,
}

impl<'a> ReaderChain<'a> {
    /// Build a chain applying every mapping in `mappings` to `source`.
    ///
    /// Returns `Err(NoMappings)` for an empty table.
    pub fn build<R: Read + 'a>(source: R, mappings: &MappingTable) -> Result<Self> {
        Self::build_with_chunk_size(source, mappings, DEFAULT_CHUNK_SIZE)
    }

    /// Build a chain whose layers pull `chunk_size` bytes per read.
    pub fn build_with_chunk_size<R: Read + 'a>(
        source: R,
        mappings: &MappingTable,
        chunk_size: usize,
    ) -> Result<Self> {
        let mut layers = mappings.iter();
        let first = layers.next().ok_or(Error::NoMappings)?;

        let mut head = SubstitutingReader::new(
            Box::new(source) as Box<dyn Read + 'a>,
            first.old,
            first.new,
        )?
        .with_chunk_size(chunk_size);
        let mut depth = 1;

        for mapping in layers {
            let upstream: Box<dyn Read + 'a> = Box::new(head);
            head = SubstitutingReader::new(upstream, mapping.old, mapping.new)?
                .with_chunk_size(chunk_size);
            depth += 1;
        }

        tracing::trace!(depth, chunk_size, "built reader chain");
        Ok(Self { head, depth })
    }

    /// Number of substituting layers.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Read for ReaderChain<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.head.read(buf)
    }
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
