//! Content codec: converts region content between the document's native
//! markup (HTML) and the simplified dialect (Markdown).
//!
//! The native path is always the identity: `extract(..., Format::Html)`
//! returns the raw slice unchanged and `encode(..., Format::Html)` returns
//! its input unchanged, so native round trips are byte-for-byte. Conversion
//! to and from Markdown is best-effort and lossy: constructs Markdown cannot
//! represent (scripts, arbitrary attributes, deep nesting) degrade to their
//! textual content instead of failing.

mod html_to_md;
mod md_to_html;

pub use html_to_md::html_to_markdown;
pub use md_to_html::markdown_to_html;

use crate::error::RegionError;
use crate::region::RegionDescriptor;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Markup dialect of region content crossing the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// The document's native markup.
    Html,
    /// Simplified dialect for ergonomic reading and writing.
    Markdown,
}

/// Slices the region's inner content out of `raw` and converts it to
/// `output`.
pub fn extract(
    raw: &str,
    region: &RegionDescriptor,
    output: Format,
) -> Result<String, RegionError> {
    let inner = region.span.slice(raw);
    match output {
        Format::Html => Ok(inner.to_string()),
        Format::Markdown => html_to_markdown(inner),
    }
}

/// Converts caller-supplied content in `format` to native markup, ready to
/// splice into the document.
pub fn encode(content: &str, format: Format) -> Result<String, RegionError> {
    match format {
        Format::Html => Ok(content.to_string()),
        Format::Markdown => Ok(markdown_to_html(content)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::scan;

    #[test]
    fn native_extract_then_encode_is_identity() {
        let raw = "<!--S:a-->\n<p>Some &amp; content</p>\n<!--E:a-->";
        let region = &scan(raw).unwrap()[0];
        let extracted = extract(raw, region, Format::Html).unwrap();
        let encoded = encode(&extracted, Format::Html).unwrap();
        assert_eq!(encoded, region.span.slice(raw));
    }

    #[test]
    fn markdown_extract_converts() {
        let raw = "<!--S:a--><h1>Title</h1><!--E:a-->";
        let region = &scan(raw).unwrap()[0];
        let md = extract(raw, region, Format::Markdown).unwrap();
        assert_eq!(md, "# Title");
    }

    #[test]
    fn markdown_encode_produces_html() {
        let html = encode("# Title", Format::Markdown).unwrap();
        assert!(html.contains("<h1>Title</h1>"), "{html}");
    }
}
