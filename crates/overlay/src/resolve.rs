// Chunk: docs/chunks/diff_resolution - Committing accept/reject decisions

//! Resolution planning: turning an accept/reject decision into an exact,
//! pre-validated set of buffer lines to delete.
//!
//! Planning is split from committing so every failure mode surfaces before
//! any mutation: an unknown region id or an out-of-bounds delete set
//! returns an error while buffer and region set are still untouched.

use std::collections::BTreeSet;

use redline_buffer::TextBuffer;
use tracing::warn;

use crate::error::ResolveError;
use crate::region::{RegionId, RegionSet, MERGE_MARKER, OLD_MARKER};

/// Which side of a region the user chose to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Side {
    /// Keep the original content; discard the proposal.
    Old,
    /// Keep the proposed content; discard the original.
    New,
}

/// A validated resolution, ready to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolutionPlan {
    pub region_id: RegionId,
    /// Rejected side's lines plus both sentinel lines.
    pub lines_to_delete: BTreeSet<usize>,
}

/// Computes the delete set for resolving `id`, keeping `side_kept`.
///
/// The delete set is the rejected side's line indices, the boundary marker
/// line, and the old-block marker line. Both sentinel lines always go; only
/// one data side survives.
///
/// The old-block marker is not structurally tracked, so its derived
/// position is trusted only when the buffer line there still carries a
/// reserved marker literal. A generic edit may have rewritten or removed
/// it; in that case the line is left alone and the mismatch is logged.
pub(crate) fn plan_resolution(
    regions: &RegionSet,
    buffer: &TextBuffer,
    id: RegionId,
    side_kept: Side,
) -> Result<ResolutionPlan, ResolveError> {
    let region = regions.get(id).ok_or(ResolveError::NotFound(id))?;

    let mut lines_to_delete: BTreeSet<usize> = match side_kept {
        Side::New => region.old_lines.iter().copied().collect(),
        Side::Old => region.new_lines.iter().copied().collect(),
    };
    lines_to_delete.insert(region.merge_line);

    if let Some(marker) = region.old_marker_line() {
        match buffer.line(marker) {
            Some(content) if content == OLD_MARKER || content == MERGE_MARKER => {
                lines_to_delete.insert(marker);
            }
            Some(_) => {
                warn!(
                    region = id.0,
                    line = marker,
                    "old-block marker line no longer carries a reserved literal; leaving it in place"
                );
            }
            None => {
                // Position already past the buffer end; the bounds check
                // below reports the region as unresolvable.
            }
        }
    }

    if let Some(&max) = lines_to_delete.iter().next_back() {
        if max >= buffer.line_count() {
            return Err(ResolveError::OutOfRange {
                index: max,
                len: buffer.line_count(),
            });
        }
    }

    Ok(ResolutionPlan {
        region_id: id,
        lines_to_delete,
    })
}

impl RegionSet {
    /// Removes the resolved region and renumbers every later region past
    /// the deleted lines. Infallible: the caller holds a validated plan and
    /// the single-writer session rules out interleaved changes.
    pub(crate) fn commit_resolution(&mut self, plan: &ResolutionPlan) {
        let count = plan.lines_to_delete.len();
        self.shift_after(plan.region_id, count);
        self.remove(plan.region_id);
        self.assert_consistent();
    }
}
