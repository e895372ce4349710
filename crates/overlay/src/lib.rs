// Chunk: docs/chunks/diff_regions - Anchored diff regions and their invariants
// Chunk: docs/chunks/suggestion_session - Session ownership and collaborator seams

//! redline-overlay: diff-region overlay engine for machine-suggested edits.
//!
//! A suggested revision of the user's code is presented inline: the buffer
//! is rewritten so each changed run shows both its current and its proposed
//! content between marker lines, and a [`DiffRegion`] anchors each block.
//! The user keeps editing the whole time; this crate's job is keeping every
//! region's line indices correct under those edits, and committing the
//! user's accept/reject decisions.
//!
//! # Overview
//!
//! - [`SuggestionSession`] owns one [`TextBuffer`] and one region set and is
//!   the only mutation path for either.
//! - [`merge_suggestion`] builds the merged overlay buffer and region batch
//!   from `(original, proposed)` line sequences.
//! - Edit events remap regions through the session; see the `remap` module
//!   docs for the case-by-case policy.
//! - [`DecorationSink`] is the seam to the host's rendering layer.
//!
//! # Example
//!
//! ```
//! use redline_overlay::{Side, SuggestionSession};
//!
//! let mut session = SuggestionSession::new(vec![
//!     "def f():".to_string(),
//!     "    old_line".to_string(),
//! ]);
//!
//! // A proposal arrives; install it as an inline overlay.
//! let ids = session.apply_suggestion(&[
//!     "def f():".to_string(),
//!     "    new_line".to_string(),
//! ]);
//! assert_eq!(ids.len(), 1);
//! assert_eq!(session.buffer().line_count(), 5);
//!
//! // The user accepts the proposed side.
//! session.resolve(ids[0], Side::New).unwrap();
//! assert_eq!(session.buffer().lines(), &["def f():", "    new_line"]);
//! assert!(session.regions().is_empty());
//! ```
//!
//! # Guarantees
//!
//! - Region invariants (ordered three-part spans; disjoint regions with id
//!   order equal to position order) hold after every operation, or the
//!   affected region has been dropped per a documented policy.
//! - Buffer mutations always apply; region bookkeeping is best-effort and
//!   its failures are logged, never raised to the editing surface.
//! - Failed resolutions (`NotFound`, `OutOfRange`) mutate nothing.

mod decorations;
mod error;
mod merge;
mod region;
mod remap;
mod resolve;
mod session;

pub use decorations::{DecorationSink, NullDecorations};
pub use error::{ResolveError, StructuralViolation};
pub use merge::{merge_suggestion, MergedSuggestion};
pub use region::{DiffRegion, RegionId, RegionSet, MERGE_MARKER, OLD_MARKER};
pub use resolve::Side;
pub use session::SuggestionSession;

// Re-exported so integrators can drive a session without naming the buffer
// crate directly.
pub use redline_buffer::{BufferError, EditEvent, EditShape, Position, TextBuffer};
