// Chunk: docs/chunks/suggestion_merge - Building the merged overlay buffer from a proposal

//! Line-level merge of a proposed revision into the current buffer.
//!
//! This module turns `(original, proposed)` into the merged buffer the
//! overlay anchors to: equal runs pass through untouched, and each changed
//! run is rendered as a marked block holding both sides:
//!
//! ```text
//! <<<<<<< current
//! [old lines...]
//! >>>>>>> suggested
//! [new lines...]
//! ```
//!
//! One [`DiffRegion`] is produced per block, numbered left to right, so the
//! returned batch satisfies the ordering and disjointness invariants by
//! construction.

use similar::{capture_diff_slices, Algorithm, DiffOp};
use tracing::debug;

use crate::region::{DiffRegion, RegionId, MERGE_MARKER, OLD_MARKER};

/// Result of merging a proposal into the current buffer content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedSuggestion {
    /// The merged buffer the regions are anchored in.
    pub lines: Vec<String>,
    /// Freshly numbered regions, one per changed block, in buffer order.
    pub regions: Vec<DiffRegion>,
}

impl MergedSuggestion {
    /// Returns true if the proposal changed nothing.
    pub fn is_unchanged(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Merges `proposed` into `original`, rendering each changed run as a
/// marked old/new block and returning the regions that anchor them.
///
/// Region ids count up from `first_id`; the caller owns the monotonic
/// counter so ids stay unique across successive suggestions.
pub fn merge_suggestion(
    original: &[String],
    proposed: &[String],
    first_id: RegionId,
) -> MergedSuggestion {
    let ops = capture_diff_slices(Algorithm::Myers, original, proposed);

    let mut lines: Vec<String> = Vec::with_capacity(original.len().max(proposed.len()));
    let mut regions: Vec<DiffRegion> = Vec::new();
    let mut next_id = first_id.0;

    // Old/new content of the changed block currently being accumulated.
    // Adjacent non-equal ops collapse into one block so a replace next to
    // an insert reads as a single suggestion.
    let mut pending_old: Vec<String> = Vec::new();
    let mut pending_new: Vec<String> = Vec::new();

    let mut flush =
        |lines: &mut Vec<String>, old: &mut Vec<String>, new: &mut Vec<String>| {
            if old.is_empty() && new.is_empty() {
                return;
            }
            lines.push(OLD_MARKER.to_string());
            let old_start = lines.len();
            lines.append(old);
            let old_lines: Vec<usize> = (old_start..lines.len()).collect();

            let merge_line = lines.len();
            lines.push(MERGE_MARKER.to_string());

            let new_start = lines.len();
            lines.append(new);
            let new_lines: Vec<usize> = (new_start..lines.len()).collect();

            regions.push(DiffRegion::new(
                RegionId(next_id),
                old_lines,
                merge_line,
                new_lines,
            ));
            next_id += 1;
        };

    for op in &ops {
        match *op {
            DiffOp::Equal { old_index, len, .. } => {
                flush(&mut lines, &mut pending_old, &mut pending_new);
                lines.extend(original[old_index..old_index + len].iter().cloned());
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                pending_old.extend(original[old_index..old_index + old_len].iter().cloned());
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                pending_new.extend(proposed[new_index..new_index + new_len].iter().cloned());
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                pending_old.extend(original[old_index..old_index + old_len].iter().cloned());
                pending_new.extend(proposed[new_index..new_index + new_len].iter().cloned());
            }
        }
    }
    flush(&mut lines, &mut pending_old, &mut pending_new);

    debug!(
        regions = regions.len(),
        merged_lines = lines.len(),
        "built suggestion overlay"
    );

    MergedSuggestion { lines, regions }
}
