use crate::error::RegionError;
use crate::region::RegionDescriptor;
use std::collections::HashMap;

/// Validated name -> region mapping for one exact version of the raw text.
///
/// Built fresh from a scan; never updated in place. `list` preserves document
/// order (ascending span start), which is the order `get_regions` reports.
#[derive(Debug, Clone, Default)]
pub struct RegionIndex {
    regions: Vec<RegionDescriptor>,
    by_name: HashMap<String, usize>,
}

impl RegionIndex {
    /// Builds the index, rejecting duplicate region names and overlapping
    /// spans. The scanner never emits overlaps, but `build` accepts
    /// descriptors from any source and the no-overlap invariant is what the
    /// mutation engine's isolation guarantee rests on.
    pub fn build(mut regions: Vec<RegionDescriptor>) -> Result<Self, RegionError> {
        regions.sort_by_key(|r| r.span.start);

        for pair in regions.windows(2) {
            if pair[0].span.overlaps(pair[1].span) {
                return Err(RegionError::malformed(
                    pair[1].start_line,
                    format!("regions '{}' and '{}' overlap", pair[0].name, pair[1].name),
                ));
            }
        }

        let mut by_name = HashMap::with_capacity(regions.len());
        for (i, region) in regions.iter().enumerate() {
            if by_name.insert(region.name.clone(), i).is_some() {
                return Err(RegionError::DuplicateName {
                    name: region.name.clone(),
                });
            }
        }

        Ok(Self { regions, by_name })
    }

    pub fn lookup(&self, name: &str) -> Result<&RegionDescriptor, RegionError> {
        self.by_name
            .get(name)
            .map(|&i| &self.regions[i])
            .ok_or_else(|| RegionError::RegionNotFound {
                name: name.to_string(),
            })
    }

    /// All regions in document order.
    pub fn list(&self) -> &[RegionDescriptor] {
        &self.regions
    }
}
