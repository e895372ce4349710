// Chunk: docs/chunks/suggestion_session - Session ownership and collaborator seams

//! The suggestion session: single owner of one buffer and one region set.
//!
//! Every operation on the overlay state goes through a `&mut self` method
//! here, so edits, remaps, and resolutions serialize naturally and no
//! caller ever observes the buffer and the region set out of step. Nothing
//! outside this type mutates either.
//!
//! Suggestion production stays outside the session: the integrator
//! snapshots `buffer().lines()`, computes or fetches a proposal (no session
//! lock is held while a request is in flight), then installs the result
//! with [`SuggestionSession::apply_suggestion`], which replaces buffer and
//! region set wholesale. If the user edited while the proposal was
//! outstanding, the integrator re-snapshots and re-merges; stale proposals
//! are never stitched into fresh edits field by field.

use redline_buffer::{BufferError, EditEvent, EditShape, TextBuffer};
use tracing::{debug, warn};

use crate::decorations::{DecorationSink, NullDecorations};
use crate::error::{ResolveError, StructuralViolation};
use crate::merge::merge_suggestion;
use crate::region::{DiffRegion, RegionId, RegionSet};
use crate::resolve::{plan_resolution, Side};

/// Owns the live buffer, the active diff regions, and the decoration seam.
#[derive(Debug)]
pub struct SuggestionSession<D: DecorationSink = NullDecorations> {
    buffer: TextBuffer,
    regions: RegionSet,
    decorations: D,
    /// Next region id to hand out; never reused within a session.
    next_region_id: u64,
}

impl SuggestionSession<NullDecorations> {
    /// Creates a session over the given content with no decoration sink.
    pub fn new(initial_lines: Vec<String>) -> Self {
        Self::with_decorations(initial_lines, NullDecorations)
    }
}

impl<D: DecorationSink> SuggestionSession<D> {
    /// Creates a session that reports decoration lifecycle events to `sink`.
    pub fn with_decorations(initial_lines: Vec<String>, sink: D) -> Self {
        Self {
            buffer: TextBuffer::from_lines(initial_lines),
            regions: RegionSet::new(),
            decorations: sink,
            next_region_id: 0,
        }
    }

    // ==================== Accessors ====================

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Active regions in id (== position) order.
    pub fn regions(&self) -> &[DiffRegion] {
        self.regions.regions()
    }

    pub fn region(&self, id: RegionId) -> Option<&DiffRegion> {
        self.regions.get(id)
    }

    /// Bumps on every buffer/region transform; lets readers detect stale
    /// snapshots.
    pub fn version(&self) -> u64 {
        self.regions.version()
    }

    pub fn decorations(&self) -> &D {
        &self.decorations
    }

    // ==================== Suggestion lifecycle ====================

    /// Merges a proposed revision of the current buffer content and
    /// installs the result: merged lines plus a fresh region batch replace
    /// the active state in one step.
    ///
    /// Returns the ids of the installed regions (empty if the proposal
    /// changed nothing, in which case the buffer is left untouched).
    pub fn apply_suggestion(&mut self, proposed: &[String]) -> Vec<RegionId> {
        let merged = merge_suggestion(
            self.buffer.lines(),
            proposed,
            RegionId(self.next_region_id),
        );
        if merged.is_unchanged() {
            return Vec::new();
        }
        // Built left to right with fresh ids, so this cannot fail
        // validation; route through the validated path anyway.
        match self.install(merged.lines, merged.regions) {
            Ok(ids) => ids,
            Err(violation) => {
                warn!(error = %violation, "merge produced an invalid batch; suggestion dropped");
                Vec::new()
            }
        }
    }

    /// Installs a merged buffer and region batch produced by an external
    /// diff computation. The batch is validated before anything mutates;
    /// a rejected batch leaves the session untouched.
    pub fn apply_prebuilt_suggestion(
        &mut self,
        lines: Vec<String>,
        regions: Vec<DiffRegion>,
    ) -> Result<Vec<RegionId>, StructuralViolation> {
        self.install(lines, regions)
    }

    /// Drops every active region, leaving the buffer as it stands (the
    /// user dismissed the suggestion wholesale, markers and all remaining
    /// text stay put until edited away).
    pub fn clear_suggestion(&mut self) {
        let departed = self.regions.clear();
        for region in &departed {
            self.decorations.detach(region);
        }
        if !departed.is_empty() {
            debug!(regions = departed.len(), "cleared active suggestion");
        }
    }

    fn install(
        &mut self,
        lines: Vec<String>,
        regions: Vec<DiffRegion>,
    ) -> Result<Vec<RegionId>, StructuralViolation> {
        // Validated swap; a rejected batch leaves the set untouched and we
        // bail before the buffer is touched either.
        let departed = self.regions.replace(regions)?;
        for region in &departed {
            self.decorations.detach(region);
        }

        self.buffer.set_lines(lines);

        let mut ids = Vec::with_capacity(self.regions.len());
        for region in self.regions.regions() {
            self.decorations.attach_old(region);
            self.decorations.attach_new(region);
            self.next_region_id = self.next_region_id.max(region.id.0 + 1);
            ids.push(region.id);
        }

        debug!(regions = ids.len(), "installed suggestion");
        Ok(ids)
    }

    // ==================== Editing ====================

    /// Applies one edit event from the host surface.
    ///
    /// The buffer mutation is authoritative: once it succeeds it is never
    /// rolled back, and region bookkeeping proceeds best-effort. Regions
    /// the edit destroys (marker deleted, new side emptied, or a violation
    /// the policies could not prevent) are dropped and their decorations
    /// detached; the edit still succeeds.
    ///
    /// Fails only when the event itself is malformed (out of bounds or
    /// inverted), in which case nothing mutates.
    pub fn handle_edit(&mut self, event: &EditEvent) -> Result<EditShape, BufferError> {
        let shape = self.buffer.apply_edit(event)?;
        let dropped = self.regions.apply_edit_shape(&shape);
        for region in &dropped {
            self.decorations.detach(region);
        }
        Ok(shape)
    }

    // ==================== Resolution ====================

    /// Commits the user's accept/reject decision for one region.
    ///
    /// Deletes the rejected side and both marker lines, removes the region,
    /// and renumbers every later region, all within this call: no reader
    /// sees the buffer updated without the region set or vice versa.
    ///
    /// `NotFound` and `OutOfRange` are reported before anything mutates.
    pub fn resolve(&mut self, id: RegionId, side_kept: Side) -> Result<(), ResolveError> {
        let plan = plan_resolution(&self.regions, &self.buffer, id, side_kept)?;

        if let Some(region) = self.regions.get(id) {
            self.decorations.detach(region);
        }

        if let Err(error) = self.buffer.delete_lines(&plan.lines_to_delete) {
            // The plan bound-checked every index against this buffer, and
            // the single-writer session rules out interleaved changes, so
            // this cannot happen; refuse to touch the regions if it does.
            warn!(region = id.0, error = %error, "resolution delete set no longer fits the buffer");
            return Err(ResolveError::OutOfRange {
                index: plan
                    .lines_to_delete
                    .iter()
                    .next_back()
                    .copied()
                    .unwrap_or(0),
                len: self.buffer.line_count(),
            });
        }
        self.regions.commit_resolution(&plan);

        debug!(
            region = id.0,
            deleted = plan.lines_to_delete.len(),
            remaining = self.regions.len(),
            "resolved region"
        );
        Ok(())
    }
}
