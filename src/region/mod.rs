//! Editable-region model: marker scanning and the name -> region index.
//!
//! A region is a named, non-overlapping stretch of document text delimited by
//! a start/end marker pair (HTML comments). The scanner discovers regions and
//! their byte spans; the index validates them (unique names) and serves
//! lookups. Both are rebuilt from scratch on every scan: spans shift after
//! any mutation, so an index is only ever valid for the exact text it was
//! built from.

mod index;
mod scanner;
mod span;

pub use index::RegionIndex;
pub use scanner::scan;
pub use span::Span;

use serde::{Deserialize, Serialize};

/// A discovered editable region.
///
/// `span` is the inner content only; the markers themselves are excluded.
/// `start_line`/`end_line` are 1-based and exist for human-facing reporting
/// (they land on the marker lines when the markers sit on their own lines).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDescriptor {
    pub name: String,
    #[serde(skip)]
    pub span: Span,
    pub start_line: usize,
    pub end_line: usize,
}
