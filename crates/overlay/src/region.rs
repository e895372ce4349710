// Chunk: docs/chunks/diff_regions - Anchored diff regions and their invariants

//! The diff-region data model.
//!
//! A [`DiffRegion`] anchors one suggested change to buffer positions as three
//! ordered parts: the old-content line run, a single boundary marker line,
//! and the new-content line run. A [`RegionSet`] owns every active region
//! for a session and is the only place regions are transformed, under a
//! single-writer discipline with validation after every transform.
//!
//! # Invariants
//!
//! - Within a region: `old_lines` and `new_lines` are strictly ascending
//!   contiguous runs, and every old line comes before `merge_line`, which
//!   comes before every new line.
//! - Across regions: regions never overlap, and id order equals buffer
//!   position order at all times. Ids are assigned in left-to-right creation
//!   order and never reassigned, so both orders coincide by construction and
//!   every transform must keep them coinciding.

use serde::{Deserialize, Serialize};

use crate::error::StructuralViolation;

/// Reserved literal content of the line that opens a region's old block.
pub const OLD_MARKER: &str = "<<<<<<< current";

/// Reserved literal content of a region's boundary marker line (the
/// `merge_line`), which also opens the new block.
pub const MERGE_MARKER: &str = ">>>>>>> suggested";

/// Identifier of a diff region, unique within a session.
///
/// Assigned strictly increasing in creation order and never reassigned, so
/// comparing ids compares buffer positions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RegionId(pub u64);

/// One suggested change anchored to buffer positions.
///
/// The region spans `[span_start, span_end]`: old lines (possibly none),
/// then the marker line, then new lines (possibly none). The old-block
/// marker line sits just before `span_start` and is not tracked by the
/// region itself; the resolver re-derives it when committing a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRegion {
    pub id: RegionId,
    /// Ascending contiguous run of lines holding the original content.
    pub old_lines: Vec<usize>,
    /// The boundary marker line separating old from new content.
    pub merge_line: usize,
    /// Ascending contiguous run of lines holding the proposed content.
    pub new_lines: Vec<usize>,
}

impl DiffRegion {
    pub fn new(id: RegionId, old_lines: Vec<usize>, merge_line: usize, new_lines: Vec<usize>) -> Self {
        Self {
            id,
            old_lines,
            merge_line,
            new_lines,
        }
    }

    /// First buffer line of the region's tracked span.
    pub fn span_start(&self) -> usize {
        self.old_lines.first().copied().unwrap_or(self.merge_line)
    }

    /// Last buffer line of the region's tracked span.
    pub fn span_end(&self) -> usize {
        self.new_lines.last().copied().unwrap_or(self.merge_line)
    }

    /// Buffer line of the old-block marker, derived region-relatively.
    ///
    /// Returns `None` for the degenerate case of a span starting at line 0,
    /// where no line can precede the old block.
    pub fn old_marker_line(&self) -> Option<usize> {
        self.span_start().checked_sub(1)
    }

    /// Renumbers the whole region forward by `count` lines.
    pub(crate) fn shift_forward(&mut self, count: usize) {
        for line in &mut self.old_lines {
            *line += count;
        }
        self.merge_line += count;
        for line in &mut self.new_lines {
            *line += count;
        }
    }

    /// Renumbers the whole region backward by `count` lines.
    ///
    /// Saturating: an underflow here means tracking already went wrong, and
    /// the validator will drop the region rather than wrap an index.
    pub(crate) fn shift_back(&mut self, count: usize) {
        for line in &mut self.old_lines {
            *line = line.saturating_sub(count);
        }
        self.merge_line = self.merge_line.saturating_sub(count);
        for line in &mut self.new_lines {
            *line = line.saturating_sub(count);
        }
    }

    /// Checks the intra-region invariant: both runs strictly ascending and
    /// contiguous, old run before the marker, marker before the new run.
    pub fn validate(&self) -> Result<(), StructuralViolation> {
        if !is_contiguous_run(&self.old_lines) {
            return Err(StructuralViolation::new(
                self.id,
                format!("old_lines is not a contiguous ascending run: {:?}", self.old_lines),
            ));
        }
        if !is_contiguous_run(&self.new_lines) {
            return Err(StructuralViolation::new(
                self.id,
                format!("new_lines is not a contiguous ascending run: {:?}", self.new_lines),
            ));
        }
        if let Some(&last_old) = self.old_lines.last() {
            if last_old >= self.merge_line {
                return Err(StructuralViolation::new(
                    self.id,
                    format!("old line {last_old} not before merge line {}", self.merge_line),
                ));
            }
        }
        if let Some(&first_new) = self.new_lines.first() {
            if first_new <= self.merge_line {
                return Err(StructuralViolation::new(
                    self.id,
                    format!("new line {first_new} not after merge line {}", self.merge_line),
                ));
            }
        }
        Ok(())
    }
}

fn is_contiguous_run(lines: &[usize]) -> bool {
    lines.windows(2).all(|pair| pair[1] == pair[0] + 1)
}

/// The owned, versioned collection of every active region in a session.
///
/// All transforms run through `&mut self` methods that validate before
/// returning, so no caller ever observes a partially-updated set. The
/// version counter bumps on every transform; readers holding stale
/// snapshots can detect they are stale.
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    regions: Vec<DiffRegion>,
    version: u64,
    /// Transform counter for sampling debug assertions (debug builds only).
    #[cfg(debug_assertions)]
    debug_transform_count: u64,
}

impl RegionSet {
    /// Creates an empty region set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from externally produced regions, validating both
    /// invariants before accepting anything.
    pub fn from_regions(regions: Vec<DiffRegion>) -> Result<Self, StructuralViolation> {
        let set = Self {
            regions,
            version: 0,
            #[cfg(debug_assertions)]
            debug_transform_count: 0,
        };
        set.validate()?;
        Ok(set)
    }

    // ==================== Accessors ====================

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Returns the active regions in id (== position) order.
    pub fn regions(&self) -> &[DiffRegion] {
        &self.regions
    }

    /// Looks up a region by id.
    pub fn get(&self, id: RegionId) -> Option<&DiffRegion> {
        self.regions.iter().find(|region| region.id == id)
    }

    /// Transform counter; bumps on every mutation of the set.
    pub fn version(&self) -> u64 {
        self.version
    }

    // ==================== Transforms ====================

    /// Replaces the whole set atomically with a validated new batch,
    /// returning the departed regions. On a rejected batch nothing changes.
    pub fn replace(
        &mut self,
        regions: Vec<DiffRegion>,
    ) -> Result<Vec<DiffRegion>, StructuralViolation> {
        let candidate = Self::from_regions(regions)?;
        let departed = std::mem::replace(&mut self.regions, candidate.regions);
        self.bump_version();
        Ok(departed)
    }

    /// Drops every region.
    pub fn clear(&mut self) -> Vec<DiffRegion> {
        let departed = std::mem::take(&mut self.regions);
        self.bump_version();
        departed
    }

    /// Removes a single region by id, returning it.
    pub(crate) fn remove(&mut self, id: RegionId) -> Option<DiffRegion> {
        let index = self.regions.iter().position(|region| region.id == id)?;
        let removed = self.regions.remove(index);
        self.bump_version();
        Some(removed)
    }

    /// Renumbers every region with id strictly greater than `id` backward
    /// by `count` lines. Regions with smaller ids sit earlier in the buffer
    /// and are untouched.
    pub(crate) fn shift_after(&mut self, id: RegionId, count: usize) {
        for region in &mut self.regions {
            if region.id > id {
                region.shift_back(count);
            }
        }
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }

    /// Direct access for the remap transforms in this crate. Every caller
    /// must leave the set validated or route survivors through the
    /// post-condition backstop.
    pub(crate) fn regions_vec_mut(&mut self) -> &mut Vec<DiffRegion> {
        &mut self.regions
    }

    // ==================== Validation ====================

    /// Checks the per-region shape invariant for every region, and
    /// disjointness with id order matching position order across the set.
    pub fn validate(&self) -> Result<(), StructuralViolation> {
        for region in &self.regions {
            region.validate()?;
        }
        for pair in self.regions.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if b.id <= a.id {
                return Err(StructuralViolation::new(
                    b.id,
                    format!("id order broken: {:?} follows {:?}", b.id, a.id),
                ));
            }
            if b.span_start() <= a.span_end() {
                return Err(StructuralViolation::new(
                    b.id,
                    format!(
                        "overlaps predecessor {:?}: span starts at {} but predecessor ends at {}",
                        a.id,
                        b.span_start(),
                        a.span_end()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Debug assertion: re-validates the whole set after transforms.
    ///
    /// The remap and resolve paths already guarantee validity; this catches
    /// drift from future transform bugs. Sampled so sequences of tiny edits
    /// don't pay for it on every keystroke. Compiled out in release builds.
    #[cfg(debug_assertions)]
    pub(crate) fn assert_consistent(&mut self) {
        self.debug_transform_count += 1;
        if self.debug_transform_count % 16 != 0 {
            return;
        }
        if let Err(violation) = self.validate() {
            panic!(
                "region set inconsistent after {} transforms: {}",
                self.debug_transform_count, violation
            );
        }
    }

    #[cfg(not(debug_assertions))]
    pub(crate) fn assert_consistent(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(id: u64, old: &[usize], merge: usize, new: &[usize]) -> DiffRegion {
        DiffRegion::new(RegionId(id), old.to_vec(), merge, new.to_vec())
    }

    // ==================== DiffRegion spans ====================

    #[test]
    fn span_covers_old_through_new() {
        let r = region(0, &[2, 3], 4, &[5, 6, 7]);
        assert_eq!(r.span_start(), 2);
        assert_eq!(r.span_end(), 7);
        assert_eq!(r.old_marker_line(), Some(1));
    }

    #[test]
    fn empty_old_side_falls_back_to_merge_line() {
        let r = region(0, &[], 3, &[4, 5]);
        assert_eq!(r.span_start(), 3);
        assert_eq!(r.old_marker_line(), Some(2));
    }

    #[test]
    fn empty_new_side_falls_back_to_merge_line() {
        let r = region(0, &[1, 2], 3, &[]);
        assert_eq!(r.span_end(), 3);
    }

    #[test]
    fn span_at_line_zero_has_no_marker_line() {
        let r = region(0, &[], 0, &[1]);
        assert_eq!(r.old_marker_line(), None);
    }

    // ==================== Per-region validation ====================

    #[test]
    fn well_formed_region_validates() {
        assert!(region(0, &[2], 3, &[4]).validate().is_ok());
        assert!(region(1, &[], 0, &[1, 2]).validate().is_ok());
        assert!(region(2, &[5, 6], 7, &[]).validate().is_ok());
    }

    #[test]
    fn old_line_at_merge_line_is_a_violation() {
        let err = region(0, &[3], 3, &[4]).validate().unwrap_err();
        assert_eq!(err.id, RegionId(0));
    }

    #[test]
    fn new_line_at_merge_line_is_a_violation() {
        assert!(region(0, &[2], 3, &[3]).validate().is_err());
    }

    #[test]
    fn gapped_run_is_a_violation() {
        assert!(region(0, &[2, 4], 5, &[6]).validate().is_err());
        assert!(region(0, &[2], 3, &[4, 6]).validate().is_err());
    }

    #[test]
    fn descending_run_is_a_violation() {
        assert!(region(0, &[3, 2], 4, &[5]).validate().is_err());
    }

    // ==================== Cross-region validation ====================

    #[test]
    fn disjoint_ordered_regions_validate() {
        let set = RegionSet::from_regions(vec![
            region(0, &[1], 2, &[3]),
            region(1, &[6], 7, &[8, 9]),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn overlapping_regions_are_rejected() {
        let err = RegionSet::from_regions(vec![
            region(0, &[1], 2, &[3, 4]),
            region(1, &[4], 5, &[6]),
        ])
        .unwrap_err();
        assert_eq!(err.id, RegionId(1));
    }

    #[test]
    fn id_order_must_match_position_order() {
        let err = RegionSet::from_regions(vec![
            region(1, &[1], 2, &[3]),
            region(0, &[6], 7, &[8]),
        ])
        .unwrap_err();
        assert_eq!(err.id, RegionId(0));
    }

    // ==================== Set transforms ====================

    #[test]
    fn replace_swaps_whole_batch_and_bumps_version() {
        let mut set = RegionSet::from_regions(vec![region(0, &[1], 2, &[3])]).unwrap();
        let v0 = set.version();
        set.replace(vec![region(1, &[4], 5, &[6])]).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.get(RegionId(0)).is_none());
        assert!(set.get(RegionId(1)).is_some());
        assert!(set.version() > v0);
    }

    #[test]
    fn replace_with_invalid_batch_leaves_set_untouched() {
        let mut set = RegionSet::from_regions(vec![region(0, &[1], 2, &[3])]).unwrap();
        let before = set.regions().to_vec();
        let v0 = set.version();
        assert!(set.replace(vec![region(1, &[4, 6], 7, &[8])]).is_err());
        assert_eq!(set.regions(), &before[..]);
        assert_eq!(set.version(), v0);
    }

    #[test]
    fn shift_after_only_touches_greater_ids() {
        let mut set = RegionSet::from_regions(vec![
            region(0, &[1], 2, &[3]),
            region(1, &[6], 7, &[8]),
            region(2, &[11], 12, &[13]),
        ])
        .unwrap();
        set.shift_after(RegionId(1), 3);
        assert_eq!(set.get(RegionId(0)).unwrap().merge_line, 2);
        assert_eq!(set.get(RegionId(1)).unwrap().merge_line, 7);
        assert_eq!(set.get(RegionId(2)).unwrap().merge_line, 9);
    }
}
