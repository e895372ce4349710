// Chunk: docs/chunks/line_buffer - Line-granularity buffer with edit shape reporting

//! redline-buffer: the line-granularity text buffer for redline.
//!
//! This crate provides an ordered-sequence-of-lines buffer mutated by
//! line-range replacement, with structured edit classification for region
//! tracking.
//!
//! # Overview
//!
//! The main type is [`TextBuffer`], which provides:
//! - Edit-event application by line-range replacement
//! - Exact-index line deletion for resolver commits
//! - Line-based access for rendering and diffing
//!
//! # Edit Shape Reporting
//!
//! Each `apply_edit` returns an [`EditShape`] classifying the mutation, so
//! downstream diff-region tracking can remap anchored indices without
//! re-diffing the buffer:
//!
//! - `EditShape::Insertion { at_line, count }` - the range was a single
//!   line; `count` lines were added below it (0 for in-line edits)
//! - `EditShape::Deletion { from_line, to_line, count }` - the range
//!   spanned lines; `count = to_line - from_line` lines disappeared
//!
//! # Example
//!
//! ```
//! use redline_buffer::{EditEvent, EditShape, Position, TextBuffer};
//!
//! let mut buffer = TextBuffer::from_lines(vec!["hello".into(), "world".into()]);
//!
//! // Press Enter in the middle of line 0
//! let event = EditEvent::insertion_at(0, 3, vec!["hel".into(), "lo".into()]);
//! let shape = buffer.apply_edit(&event).unwrap();
//! assert_eq!(shape, EditShape::Insertion { at_line: 0, count: 1 });
//! assert_eq!(buffer.line_count(), 3);
//! ```

mod error;
mod text_buffer;
mod types;

pub use error::BufferError;
pub use text_buffer::TextBuffer;
pub use types::{EditEvent, EditShape, Position};
