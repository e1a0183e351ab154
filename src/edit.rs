//! Mutation engine: pure text transformations scoped to one region's span.
//!
//! Every function here takes the full raw text plus a freshly resolved
//! region descriptor and returns a whole new raw text. Bytes before
//! `span.start` and after `span.end` are copied verbatim, so the rest of the
//! document cannot be disturbed. Searches are literal substring matches over
//! the region's inner content only; a match cannot straddle the span
//! boundary because the haystack is the inner slice itself.

use crate::error::RegionError;
use crate::region::RegionDescriptor;

/// Replaces the region's entire inner content with `encoded` (already in
/// native markup).
pub fn put(raw: &str, region: &RegionDescriptor, encoded: &str) -> String {
    splice(raw, region, encoded)
}

/// Replaces up to `limit` non-overlapping occurrences of `old` with `new`,
/// left to right (`None` = unbounded). Returns the new text and how many
/// occurrences were replaced; zero means the text is unchanged (a no-op, not
/// an error).
pub fn replace(
    raw: &str,
    region: &RegionDescriptor,
    old: &str,
    new: &str,
    limit: Option<usize>,
) -> (String, usize) {
    if old.is_empty() {
        return (raw.to_string(), 0);
    }
    let inner = region.span.slice(raw);
    let available = inner.matches(old).count();
    let n = match limit {
        Some(limit) => available.min(limit),
        None => available,
    };
    if n == 0 {
        return (raw.to_string(), 0);
    }
    (splice(raw, region, &inner.replacen(old, new, n)), n)
}

/// Removes the first occurrence of `needle` from the region.
pub fn delete(raw: &str, region: &RegionDescriptor, needle: &str) -> Result<String, RegionError> {
    let inner = region.span.slice(raw);
    let pos = find(inner, region, needle)?;
    let mut new_inner = String::with_capacity(inner.len() - needle.len());
    new_inner.push_str(&inner[..pos]);
    new_inner.push_str(&inner[pos + needle.len()..]);
    Ok(splice(raw, region, &new_inner))
}

/// Inserts `text` immediately before the first occurrence of `find_text`.
pub fn insert_before(
    raw: &str,
    region: &RegionDescriptor,
    find_text: &str,
    text: &str,
) -> Result<String, RegionError> {
    let inner = region.span.slice(raw);
    let pos = find(inner, region, find_text)?;
    Ok(splice(raw, region, &inserted(inner, pos, text)))
}

/// Inserts `text` immediately after the first occurrence of `find_text`.
pub fn insert_after(
    raw: &str,
    region: &RegionDescriptor,
    find_text: &str,
    text: &str,
) -> Result<String, RegionError> {
    let inner = region.span.slice(raw);
    let pos = find(inner, region, find_text)?;
    Ok(splice(raw, region, &inserted(inner, pos + find_text.len(), text)))
}

fn find(inner: &str, region: &RegionDescriptor, needle: &str) -> Result<usize, RegionError> {
    inner.find(needle).ok_or_else(|| RegionError::TextNotFound {
        region: region.name.clone(),
        needle: needle.to_string(),
    })
}

fn inserted(inner: &str, at: usize, text: &str) -> String {
    let mut out = String::with_capacity(inner.len() + text.len());
    out.push_str(&inner[..at]);
    out.push_str(text);
    out.push_str(&inner[at..]);
    out
}

fn splice(raw: &str, region: &RegionDescriptor, new_inner: &str) -> String {
    let mut out = String::with_capacity(raw.len() - region.span.len() + new_inner.len());
    out.push_str(&raw[..region.span.start]);
    out.push_str(new_inner);
    out.push_str(&raw[region.span.end..]);
    out
}
