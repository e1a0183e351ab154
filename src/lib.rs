//! Editable-region model for HTML documents.
//!
//! Documents mark editable zones with comment markers; this crate discovers
//! those zones, reads them back as HTML or Markdown, and applies scoped
//! edits (whole-region replace, substring replace, delete, insert before or
//! after) that never disturb a byte outside the target region.
//!
//! The pipeline: raw text -> [`region::scan`] -> [`RegionIndex`]; reads go
//! through the [`codec`], writes through the [`edit`] engine followed by a
//! full re-scan. [`Document`] owns one raw text plus its index, exposes the
//! flat operation set, and is the unit of load/edit/save.

pub mod codec;
pub mod document;
pub mod edit;
pub mod error;
pub mod region;

pub use codec::Format;
pub use document::Document;
pub use error::RegionError;
pub use region::{RegionDescriptor, RegionIndex, Span, scan};
