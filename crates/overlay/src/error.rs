// Chunk: docs/chunks/diff_regions - Anchored diff regions and their invariants

use thiserror::Error;

use crate::region::RegionId;

/// A region (or region pair) no longer satisfies the structural invariants.
///
/// This is an internal degradation signal: the engine logs it and drops the
/// offending region from tracking rather than failing the host edit. The
/// buffer mutation that exposed the violation has already been committed and
/// stays committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("region {id:?} violates structural invariants: {detail}")]
pub struct StructuralViolation {
    pub id: RegionId,
    pub detail: String,
}

impl StructuralViolation {
    pub(crate) fn new(id: RegionId, detail: impl Into<String>) -> Self {
        Self {
            id,
            detail: detail.into(),
        }
    }
}

/// Errors reported to the caller of a resolution request.
///
/// A failed resolution performs no buffer or region mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No active region carries the requested id (already resolved, or
    /// never existed).
    #[error("no active region with id {0:?}")]
    NotFound(RegionId),

    /// The computed delete set reaches outside the current buffer.
    #[error("resolution would delete line {index} outside buffer of {len} lines")]
    OutOfRange { index: usize, len: usize },
}
