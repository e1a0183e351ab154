//! In-memory document: raw text plus the region index derived from it.
//!
//! The raw text is the single source of truth. Every mutation is computed
//! into a candidate text, re-scanned and re-indexed, and only committed when
//! validation succeeds — so the index always matches the current text
//! exactly, and an edit that would inject or destroy region markers is
//! rejected with the document left untouched.

use crate::codec::{self, Format};
use crate::edit;
use crate::error::RegionError;
use crate::region::{RegionDescriptor, RegionIndex, scan};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Document {
    raw_text: String,
    index: RegionIndex,
}

impl Document {
    /// Builds a document from raw markup, scanning and indexing its regions.
    pub fn parse(text: impl Into<String>) -> Result<Self, RegionError> {
        let raw_text = text.into();
        let index = RegionIndex::build(scan(&raw_text)?)?;
        Ok(Self { raw_text, index })
    }

    /// Reads and parses the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegionError> {
        Self::parse(fs::read_to_string(path)?)
    }

    /// Writes the current raw text to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RegionError> {
        fs::write(path, &self.raw_text)?;
        Ok(())
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// All regions in document order.
    pub fn regions(&self) -> &[RegionDescriptor] {
        self.index.list()
    }

    pub fn region(&self, name: &str) -> Result<&RegionDescriptor, RegionError> {
        self.index.lookup(name)
    }

    /// Returns the named region's content, converted to `output`.
    pub fn get_region(&self, name: &str, output: Format) -> Result<String, RegionError> {
        let region = self.index.lookup(name)?;
        codec::extract(&self.raw_text, region, output)
    }

    /// Replaces the named region's entire content. `content` is interpreted
    /// as `format` and encoded to native markup before splicing.
    pub fn put_region(
        &mut self,
        name: &str,
        content: &str,
        format: Format,
    ) -> Result<(), RegionError> {
        let encoded = codec::encode(content, format)?;
        let region = self.index.lookup(name)?;
        let candidate = edit::put(&self.raw_text, region, &encoded);
        self.commit(candidate)
    }

    /// Replaces up to `limit` occurrences of `old` with `new` inside the
    /// named region (`None` = unbounded). Returns the number of occurrences
    /// replaced; zero means nothing matched and the document is unchanged.
    pub fn replace_in_region(
        &mut self,
        name: &str,
        old: &str,
        new: &str,
        limit: Option<usize>,
    ) -> Result<usize, RegionError> {
        let region = self.index.lookup(name)?;
        let (candidate, n) = edit::replace(&self.raw_text, region, old, new, limit);
        if n > 0 {
            self.commit(candidate)?;
        }
        Ok(n)
    }

    /// Removes the first occurrence of `needle` inside the named region.
    pub fn delete_in_region(&mut self, name: &str, needle: &str) -> Result<(), RegionError> {
        let region = self.index.lookup(name)?;
        let candidate = edit::delete(&self.raw_text, region, needle)?;
        self.commit(candidate)
    }

    /// Inserts `text` immediately before the first occurrence of `find_text`
    /// inside the named region.
    pub fn insert_before_in_region(
        &mut self,
        name: &str,
        find_text: &str,
        text: &str,
    ) -> Result<(), RegionError> {
        let region = self.index.lookup(name)?;
        let candidate = edit::insert_before(&self.raw_text, region, find_text, text)?;
        self.commit(candidate)
    }

    /// Inserts `text` immediately after the first occurrence of `find_text`
    /// inside the named region.
    pub fn insert_after_in_region(
        &mut self,
        name: &str,
        find_text: &str,
        text: &str,
    ) -> Result<(), RegionError> {
        let region = self.index.lookup(name)?;
        let candidate = edit::insert_after(&self.raw_text, region, find_text, text)?;
        self.commit(candidate)
    }

    /// Validates a candidate text and adopts it. Spans shift after any edit,
    /// so the index is rebuilt from a full re-scan rather than patched.
    fn commit(&mut self, candidate: String) -> Result<(), RegionError> {
        let index = RegionIndex::build(scan(&candidate)?)?;
        self.raw_text = candidate;
        self.index = index;
        Ok(())
    }
}
