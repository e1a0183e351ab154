use thiserror::Error;

/// Errors surfaced by region scanning, lookup, conversion and mutation.
///
/// Scan-level failures (`MalformedRegion`, `DuplicateName`) are fatal for the
/// document that produced them: no partial index is ever handed out. The
/// per-call failures (`RegionNotFound`, `TextNotFound`, `Codec`) leave the
/// document untouched.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Unmatched, nested or mismatched region markers.
    #[error("malformed region markers at line {line}: {reason}")]
    MalformedRegion { line: usize, reason: String },

    /// Two regions share the same name.
    #[error("duplicate region name '{name}'")]
    DuplicateName { name: String },

    /// The named region does not exist in the document.
    #[error("region '{name}' not found")]
    RegionNotFound { name: String },

    /// A delete/insert search string was not found inside the region.
    #[error("text {needle:?} not found in region '{region}'")]
    TextNotFound { region: String, needle: String },

    /// A format conversion could not proceed.
    #[error("codec failure: {reason}")]
    Codec { reason: String },

    /// File-level load/save failure. Never produced by the in-memory core.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegionError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRegion {
            line,
            reason: reason.into(),
        }
    }
}
