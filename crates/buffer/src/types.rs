// Chunk: docs/chunks/line_buffer - Line-granularity buffer with edit shape reporting

use serde::{Deserialize, Serialize};

/// Position in the buffer as (line, column) where both are 0-indexed.
///
/// Edit events carry full positions because the host editing surface works at
/// character granularity; the line-tracking core only reads `line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// A single user-visible change reported by the host editing surface.
///
/// The surface emits one event per change: `inserted_lines` replaces the line
/// range `[from.line, to.line]`. Column positions are carried through but
/// ignored by line-granular tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditEvent {
    pub from: Position,
    pub to: Position,
    pub inserted_lines: Vec<String>,
}

impl EditEvent {
    pub fn new(from: Position, to: Position, inserted_lines: Vec<String>) -> Self {
        Self {
            from,
            to,
            inserted_lines,
        }
    }

    /// Convenience constructor for a same-line edit (typing or pasting at a
    /// single position).
    pub fn insertion_at(line: usize, col: usize, inserted_lines: Vec<String>) -> Self {
        Self::new(
            Position::new(line, col),
            Position::new(line, col),
            inserted_lines,
        )
    }
}

/// Structured classification of a buffer mutation.
///
/// Every successful `TextBuffer::apply_edit` returns one of these so
/// downstream region tracking can remap without re-diffing the buffer.
///
/// - `Insertion` when the event's range is a single line
///   (`count = inserted_lines.len() - 1`, so typing within a line is an
///   insertion of zero new lines).
/// - `Deletion` when the range spans lines (`count = to_line - from_line`).
///
/// A spanning edit that also inserts multiple lines is classified purely as
/// a `Deletion`, discarding the inserted-line count. Line tracking for such
/// edits is best-effort; the region validator contains the damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditShape {
    /// `count` new lines appeared at `at_line`.
    Insertion { at_line: usize, count: usize },
    /// The line range `[from_line, to_line)` disappeared; `count` is always
    /// `to_line - from_line`.
    Deletion {
        from_line: usize,
        to_line: usize,
        count: usize,
    },
}

impl EditShape {
    /// Returns the net change in buffer line count.
    pub fn line_delta(&self) -> isize {
        match self {
            EditShape::Insertion { count, .. } => *count as isize,
            EditShape::Deletion { count, .. } => -(*count as isize),
        }
    }

    /// Returns true if the edit changed no line boundaries (single-line
    /// content edit).
    pub fn is_line_noop(&self) -> bool {
        self.line_delta() == 0
    }
}
