//! Marker scanner: discovers editable regions in raw document text.
//!
//! Two marker spellings are recognized, in any mix within one document:
//!
//! - long:  `<!-- #BeginEditable "name" -->` ... `<!-- #EndEditable -->`
//! - short: `<!--S:name-->` ... `<!--E:name-->` (end name optional)
//!
//! Regions are flat by design: a start marker inside an open region is an
//! error, not a nested region. Nesting would make "outside the region"
//! ambiguous for the mutation engine, so the scanner enforces depth <= 1
//! instead of recovering.

use crate::error::RegionError;
use crate::region::{RegionDescriptor, Span};
use regex::Regex;
use std::ops::Range;

/// Scan `raw` once, left to right, and return every region in document order.
///
/// Fails with [`RegionError::MalformedRegion`] on a start marker inside an
/// open region, an end marker with no open region, a short-form end marker
/// whose name does not match the open region, or an unclosed region at end
/// of input.
pub fn scan(raw: &str) -> Result<Vec<RegionDescriptor>, RegionError> {
    let start_re =
        Regex::new(r#"(?i)<!--\s*(?:#BeginEditable\s+"([^"]+)"|S:\s*([A-Za-z0-9_][\w.-]*))\s*-->"#)
            .unwrap();
    let end_re =
        Regex::new(r"(?i)<!--\s*(?:#EndEditable|E:\s*([A-Za-z0-9_][\w.-]*)?)\s*-->").unwrap();

    let mut markers: Vec<Marker> = Vec::new();
    for caps in start_re.captures_iter(raw) {
        let whole = caps.get(0).unwrap();
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        markers.push(Marker {
            at: whole.range(),
            kind: MarkerKind::Start { name },
        });
    }
    for caps in end_re.captures_iter(raw) {
        let whole = caps.get(0).unwrap();
        let name = caps.get(1).map(|m| m.as_str().to_string());
        markers.push(Marker {
            at: whole.range(),
            kind: MarkerKind::End { name },
        });
    }
    markers.sort_by_key(|m| m.at.start);

    let line_starts = collect_line_starts(raw);
    let line_of = |offset: usize| line_starts.partition_point(|&s| s <= offset);

    let mut regions: Vec<RegionDescriptor> = Vec::new();
    // At most one region is open at a time: (name, inner content start).
    let mut open: Option<(String, usize)> = None;

    for marker in markers {
        match marker.kind {
            MarkerKind::Start { name } => {
                if let Some((outer, _)) = &open {
                    return Err(RegionError::malformed(
                        line_of(marker.at.start),
                        format!("start of region '{name}' inside open region '{outer}'"),
                    ));
                }
                open = Some((name, marker.at.end));
            }
            MarkerKind::End { name: end_name } => {
                let Some((name, content_start)) = open.take() else {
                    return Err(RegionError::malformed(
                        line_of(marker.at.start),
                        "end marker without a matching start marker",
                    ));
                };
                if let Some(end_name) = end_name {
                    if end_name != name {
                        return Err(RegionError::malformed(
                            line_of(marker.at.start),
                            format!("end marker named '{end_name}' closes region '{name}'"),
                        ));
                    }
                }
                regions.push(RegionDescriptor {
                    span: Span::new(content_start, marker.at.start),
                    start_line: line_of(content_start),
                    end_line: line_of(marker.at.start),
                    name,
                });
            }
        }
    }

    if let Some((name, content_start)) = open {
        return Err(RegionError::malformed(
            line_of(content_start),
            format!("region '{name}' is never closed"),
        ));
    }

    Ok(regions)
}

#[derive(Debug)]
struct Marker {
    at: Range<usize>,
    kind: MarkerKind,
}

#[derive(Debug)]
enum MarkerKind {
    Start { name: String },
    End { name: Option<String> },
}

/// Byte offsets where each line begins. `partition_point(<= offset)` over
/// this is the 1-based line number of `offset`.
fn collect_line_starts(raw: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, b) in raw.bytes().enumerate() {
        if b == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_form_single_line() {
        let raw = "<!--S:a-->X<!--E:a--><!--S:b-->Y<!--E:b-->";
        let regions = scan(raw).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].name, "a");
        assert_eq!(regions[0].span.slice(raw), "X");
        assert_eq!((regions[0].start_line, regions[0].end_line), (1, 1));
        assert_eq!(regions[1].name, "b");
        assert_eq!(regions[1].span.slice(raw), "Y");
    }

    #[test]
    fn long_form_multi_line() {
        let raw = "<html>\n<!-- #BeginEditable \"body\" -->\nhello\n<!-- #EndEditable -->\n</html>\n";
        let regions = scan(raw).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "body");
        assert_eq!(regions[0].span.slice(raw), "\nhello\n");
        // start_line lands on the start-marker line, end_line on the end-marker line.
        assert_eq!((regions[0].start_line, regions[0].end_line), (2, 4));
    }

    #[test]
    fn mixed_marker_spellings() {
        let raw = "<!-- #BeginEditable \"a\" -->x<!-- #EndEditable --><!--S:b-->y<!--E:-->";
        let regions = scan(raw).unwrap();
        assert_eq!(regions[0].name, "a");
        assert_eq!(regions[1].name, "b");
        assert_eq!(regions[1].span.slice(raw), "y");
    }

    #[test]
    fn nested_start_is_malformed() {
        let raw = "<!--S:a--><!--S:b-->Y<!--E:b--><!--E:a-->";
        let err = scan(raw).unwrap_err();
        assert!(matches!(err, RegionError::MalformedRegion { line: 1, .. }), "{err}");
    }

    #[test]
    fn dangling_end_is_malformed() {
        let err = scan("text\n<!--E:a-->\n").unwrap_err();
        assert!(matches!(err, RegionError::MalformedRegion { line: 2, .. }), "{err}");
    }

    #[test]
    fn unclosed_region_is_malformed() {
        let err = scan("<!--S:a-->content with no end").unwrap_err();
        assert!(matches!(err, RegionError::MalformedRegion { .. }), "{err}");
    }

    #[test]
    fn end_name_mismatch_is_malformed() {
        let err = scan("<!--S:a-->x<!--E:b-->").unwrap_err();
        assert!(matches!(err, RegionError::MalformedRegion { .. }), "{err}");
    }

    #[test]
    fn no_markers_means_no_regions() {
        assert!(scan("<html><body>plain</body></html>").unwrap().is_empty());
    }

    #[test]
    fn marker_whitespace_is_flexible() {
        let raw = "<!-- S: head --><!--E:head-->";
        // whitespace after `S:` is allowed, trailing space before `-->` too.
        let regions = scan(raw).unwrap();
        assert_eq!(regions[0].name, "head");
        assert!(regions[0].span.is_empty());
    }
}
