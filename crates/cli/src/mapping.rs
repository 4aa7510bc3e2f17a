// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered table of `old -> new` byte sequence mappings.
//!
//! Olds and news are kept in two parallel vectors with index
//! correspondence. Registration order is the order the engines apply
//! the mappings in.

use crate::error::{Error, Result};

/// Ordered collection of byte sequence substitutions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MappingTable {
    olds: Vec<Vec<u8>>,
    news: Vec<Vec<u8>>,
}

/// A single borrowed mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping<'a> {
    pub old: &'a [u8],
    pub new: &'a [u8],
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapping.
    ///
    /// Returns `Err(InvalidMapping)` for an empty `old`, leaving the table
    /// unchanged. An empty `new` deletes every occurrence of `old`.
    pub fn add(&mut self, old: impl Into<Vec<u8>>, new: impl Into<Vec<u8>>) -> Result<()> {
        let old = old.into();
        if old.is_empty() {
            return Err(Error::InvalidMapping);
        }
        let new = new.into();

        if let Some(earlier) = self.news.iter().position(|n| contains(n, &old)) {
            tracing::warn!(
                index = self.olds.len(),
                earlier,
                "mapping matches text introduced by an earlier mapping"
            );
        }

        self.olds.push(old);
        self.news.push(new);
        Ok(())
    }

    /// Register a mapping from UTF-8 strings.
    pub fn add_str(&mut self, old: &str, new: &str) -> Result<()> {
        self.add(old.as_bytes(), new.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.olds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.olds.is_empty()
    }

    /// Mapping at `index`, if registered.
    pub fn get(&self, index: usize) -> Option<Mapping<'_>> {
        Some(Mapping {
            old: self.olds.get(index)?,
            new: self.news.get(index)?,
        })
    }

    /// Iterate mappings in registration order.
    pub fn iter(&self) -> impl Iterator<Item = Mapping<'_>> {
        self.olds
            .iter()
            .zip(&self.news)
            .map(|(old, new)| Mapping { old, new })
    }

    /// All registered `old` sequences.
    pub fn olds(&self) -> &[Vec<u8>] {
        &self.olds
    }

    /// All registered `new` sequences.
    pub fn news(&self) -> &[Vec<u8>] {
        &self.news
    }

    /// Remove every mapping, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.olds.clear();
        self.news.clear();
    }
}

impl<'a> IntoIterator for &'a MappingTable {
    type Item = Mapping<'a>;
    type IntoIter = Box<dyn Iterator<Item = Mapping<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    memchr::memmem::find(haystack, needle).is_some()
}

#[cfg(test)]
#[path = "mapping_tests.rs"]
mod tests;
