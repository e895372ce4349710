// Chunk: docs/chunks/line_buffer - Line-granularity buffer with edit shape reporting

use thiserror::Error;

/// Errors reported by buffer operations.
///
/// A failed operation performs no mutation; callers can retry or drop the
/// offending event without resynchronizing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A line index fell outside the current buffer bounds.
    #[error("line index {index} out of range for buffer of {len} lines")]
    OutOfRange { index: usize, len: usize },

    /// An edit event arrived with `from.line > to.line`.
    #[error("edit range inverted: from line {from} to line {to}")]
    InvertedRange { from: usize, to: usize },
}
