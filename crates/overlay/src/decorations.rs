// Chunk: docs/chunks/suggestion_session - Session ownership and collaborator seams

//! The decoration collaborator seam.
//!
//! Rendering of diff regions (block highlights, gutter widgets) lives in the
//! host surface, not in this crate. The session talks to it through
//! [`DecorationSink`]: one-way notifications with no return values consumed,
//! so a sink can batch, defer, or ignore them freely.
//!
//! Contract: the session attaches both decorations exactly once per freshly
//! installed region and detaches exactly once per region leaving the active
//! set. Sinks must tolerate a detach for a region they no longer know.

use crate::region::DiffRegion;

/// Receiver for region decoration lifecycle notifications.
pub trait DecorationSink {
    /// A freshly installed region's old block should be decorated.
    fn attach_old(&mut self, region: &DiffRegion);

    /// A freshly installed region's new block should be decorated.
    fn attach_new(&mut self, region: &DiffRegion);

    /// The region left the active set; remove its decorations. Must be safe
    /// to call for an already-detached region.
    fn detach(&mut self, region: &DiffRegion);
}

/// Sink that ignores every notification. The default for headless use and
/// tests that don't assert on decoration traffic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDecorations;

impl DecorationSink for NullDecorations {
    fn attach_old(&mut self, _region: &DiffRegion) {}
    fn attach_new(&mut self, _region: &DiffRegion) {}
    fn detach(&mut self, _region: &DiffRegion) {}
}
