// Chunk: docs/chunks/region_remap - Incremental region remapping under buffer edits

//! Remapping of diff regions in response to buffer edits.
//!
//! Given one [`EditShape`] and the current region set, this module renumbers
//! every region so it still points at the lines that hold its content. Each
//! region is transformed independently; disjointness makes the
//! per-region transforms commutative, so iteration order carries no meaning.
//!
//! # Policy summary
//!
//! Insertions inside a region are absorbed by the side they touch: typed
//! continuations of either block must stay inside that block rather than
//! silently escaping the diff. Insertions elsewhere renumber the region
//! without reshaping it.
//!
//! Deletions trim the side they intersect. A deletion that removes the
//! boundary marker removes the whole region: without the marker the two
//! sides can no longer be visually separated. A deletion that empties the
//! new block also removes the region. Subsequent regions renumber through
//! their own outside-the-span case.
//!
//! After every transform the set is re-validated; a region the policies
//! above failed to keep well-formed is dropped (logged, never fatal). The
//! host edit has already been applied to the buffer and is never rolled
//! back: tracking fidelity is expendable, user text is not.

use redline_buffer::EditShape;
use tracing::{debug, warn};

use crate::region::{DiffRegion, RegionSet};

/// Whether a region survived a deletion transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegionFate {
    Kept,
    Removed,
}

impl RegionSet {
    /// Transforms the set in response to one buffer edit.
    ///
    /// Returns the regions that were dropped (by policy or by the
    /// post-validation backstop) so the caller can detach their
    /// decorations. Never fails.
    pub fn apply_edit_shape(&mut self, shape: &EditShape) -> Vec<DiffRegion> {
        let mut dropped = match *shape {
            EditShape::Insertion { at_line, count } => {
                self.apply_insertion(at_line, count);
                Vec::new()
            }
            EditShape::Deletion {
                from_line, to_line, ..
            } => self.apply_deletion(from_line, to_line),
        };

        dropped.extend(self.drop_invalid_regions());
        self.bump_version();
        self.assert_consistent();
        dropped
    }

    fn apply_insertion(&mut self, at_line: usize, count: usize) {
        if count == 0 {
            return;
        }
        for region in self.regions_mut() {
            remap_for_insertion(region, at_line, count);
        }
    }

    fn apply_deletion(&mut self, from_line: usize, to_line: usize) -> Vec<DiffRegion> {
        if to_line <= from_line {
            return Vec::new();
        }
        let mut dropped = Vec::new();
        let mut kept = Vec::new();
        for mut region in self.take_regions() {
            match remap_for_deletion(&mut region, from_line, to_line) {
                RegionFate::Kept => kept.push(region),
                RegionFate::Removed => {
                    debug!(
                        region = region.id.0,
                        from_line, to_line, "deletion removed region"
                    );
                    dropped.push(region);
                }
            }
        }
        self.set_regions(kept);
        dropped
    }

    /// Post-condition backstop: any region the transform left structurally
    /// invalid is dropped from tracking, loudly.
    fn drop_invalid_regions(&mut self) -> Vec<DiffRegion> {
        // Per-region shape first, then pairwise ordering against the survivors.
        let mut dropped = Vec::new();
        let mut kept: Vec<DiffRegion> = Vec::new();
        for region in self.take_regions() {
            let verdict = region
                .validate()
                .and_then(|()| match kept.last() {
                    Some(prev) if region.id <= prev.id || region.span_start() <= prev.span_end() => {
                        Err(crate::error::StructuralViolation::new(
                            region.id,
                            format!("overlaps or disorders against {:?}", prev.id),
                        ))
                    }
                    _ => Ok(()),
                });
            match verdict {
                Ok(()) => kept.push(region),
                Err(violation) => {
                    warn!(
                        region = region.id.0,
                        error = %violation,
                        "dropping region after structural violation"
                    );
                    dropped.push(region);
                }
            }
        }
        self.set_regions(kept);
        dropped
    }

    pub(crate) fn regions_mut(&mut self) -> &mut [DiffRegion] {
        self.regions_vec_mut().as_mut_slice()
    }

    fn take_regions(&mut self) -> Vec<DiffRegion> {
        std::mem::take(self.regions_vec_mut())
    }

    fn set_regions(&mut self, regions: Vec<DiffRegion>) {
        *self.regions_vec_mut() = regions;
    }
}

/// Insertion of `count` lines at `at_line`, applied to one region.
fn remap_for_insertion(region: &mut DiffRegion, at_line: usize, count: usize) {
    // The whole span ends before the insertion point: unaffected.
    if region.span_end() < at_line {
        return;
    }

    // Inside the old block: the old side absorbs the new lines.
    if let Some(&last_old) = region.old_lines.last() {
        if run_contains(&region.old_lines, at_line) {
            region.old_lines.extend(last_old + 1..=last_old + count);
            region.merge_line += count;
            for line in &mut region.new_lines {
                *line += count;
            }
            return;
        }
    }

    // At the marker or inside the new block: the new side absorbs them.
    // The marker index deliberately stays put; the new run grows at its
    // tail, which covers the same index range because the run is
    // contiguous.
    if at_line == region.merge_line || run_contains(&region.new_lines, at_line) {
        let tail = region.new_lines.last().copied().unwrap_or(region.merge_line);
        region.new_lines.extend(tail + 1..=tail + count);
        return;
    }

    // Before the region entirely: renumber without reshaping.
    region.shift_forward(count);
}

/// Deletion of the line range `[from_line, to_line)`, applied to one region.
fn remap_for_deletion(region: &mut DiffRegion, from_line: usize, to_line: usize) -> RegionFate {
    let count = to_line - from_line;

    // The whole span ends before the deleted range: unaffected.
    if region.span_end() < from_line {
        return RegionFate::Kept;
    }

    if run_intersects(&region.old_lines, from_line, to_line) {
        if to_line > region.merge_line {
            // The deletion ran from the old block through the marker; the
            // region can no longer be displayed.
            return RegionFate::Removed;
        }
        region.old_lines.retain(|&line| line < from_line || line >= to_line);
        for line in &mut region.old_lines {
            if *line >= to_line {
                *line -= count;
            }
        }
        region.merge_line -= count;
        for line in &mut region.new_lines {
            *line -= count;
        }
        return RegionFate::Kept;
    }

    if from_line <= region.merge_line && to_line > region.merge_line {
        // The marker itself was deleted.
        return RegionFate::Removed;
    }

    if run_intersects(&region.new_lines, from_line, to_line) {
        if from_line <= region.merge_line {
            return RegionFate::Removed;
        }
        region.new_lines.retain(|&line| line < from_line || line >= to_line);
        for line in &mut region.new_lines {
            if *line >= to_line {
                *line -= count;
            }
        }
        if region.new_lines.is_empty() {
            return RegionFate::Removed;
        }
        return RegionFate::Kept;
    }

    // Entirely before the span: renumber without reshaping.
    region.shift_back(count);
    RegionFate::Kept
}

/// True if `line` falls within the run's extent (runs are contiguous, so
/// extent membership is run membership).
fn run_contains(run: &[usize], line: usize) -> bool {
    match (run.first(), run.last()) {
        (Some(&first), Some(&last)) => line >= first && line <= last,
        _ => false,
    }
}

/// True if the half-open range `[from, to)` intersects the run's extent.
fn run_intersects(run: &[usize], from: usize, to: usize) -> bool {
    match (run.first(), run.last()) {
        (Some(&first), Some(&last)) => from <= last && to > first,
        _ => false,
    }
}
