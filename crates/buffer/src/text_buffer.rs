// Chunk: docs/chunks/line_buffer - Line-granularity buffer with edit shape reporting

//! TextBuffer is the main public API for line-granular editing operations.
//!
//! The buffer is an ordered sequence of lines, 0-indexed, mutated in place by
//! line-range replacement. Each edit returns an `EditShape` classifying the
//! mutation (insertion or deletion of whole lines), which downstream region
//! tracking consumes to remap anchored line indices.
//!
//! Only two entry points mutate line structure: `apply_edit` (host surface
//! edit events) and `delete_lines` (resolver commits). Nothing else may
//! restructure the buffer.

use std::collections::BTreeSet;

use crate::error::BufferError;
use crate::types::{EditEvent, EditShape};

/// An ordered sequence of text lines.
///
/// The buffer always holds at least one line (an "empty" buffer is one empty
/// line), so every valid line index has content and `line_count()` is never
/// zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    /// Creates a new buffer containing a single empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Creates a buffer from the given lines.
    ///
    /// An empty input yields the single-empty-line buffer.
    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut buffer = Self { lines };
        buffer.ensure_non_empty();
        buffer
    }

    // ==================== Accessors ====================

    /// Returns the number of lines in the buffer.
    ///
    /// Always at least 1 (even for an empty buffer).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the content of the specified line, or `None` if the index is
    /// out of bounds.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Returns all lines as a slice.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the entire buffer content joined with newlines.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns true if the buffer holds nothing but a single empty line.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    // ==================== Mutation ====================

    /// Applies an edit event from the host surface.
    ///
    /// Replaces the line range `[from.line, to.line]` with the event's
    /// inserted lines (column positions are ignored at this granularity) and
    /// returns the `EditShape` classification for region remapping.
    ///
    /// An empty `inserted_lines` is normalized to a single empty line, which
    /// keeps the replacement arithmetic consistent: replacing N+1 lines with
    /// one line is a deletion of N lines.
    ///
    /// Fails with no mutation when the range is inverted or ends past the
    /// buffer.
    pub fn apply_edit(&mut self, event: &EditEvent) -> Result<EditShape, BufferError> {
        let from = event.from.line;
        let to = event.to.line;

        if from > to {
            return Err(BufferError::InvertedRange { from, to });
        }
        if to >= self.lines.len() {
            return Err(BufferError::OutOfRange {
                index: to,
                len: self.lines.len(),
            });
        }

        let mut inserted = event.inserted_lines.clone();
        if inserted.is_empty() {
            inserted.push(String::new());
        }

        let shape = if from == to {
            EditShape::Insertion {
                at_line: from,
                count: inserted.len() - 1,
            }
        } else {
            // A spanning replacement classifies purely as a deletion, even
            // when it also inserts multiple lines. The inserted count is
            // discarded by design.
            EditShape::Deletion {
                from_line: from,
                to_line: to,
                count: to - from,
            }
        };

        self.lines.splice(from..=to, inserted);
        self.ensure_non_empty();

        Ok(shape)
    }

    /// Removes exactly the given line indices, compacting the remainder.
    ///
    /// Used by the resolver to commit an accept/reject decision. Fails with
    /// no mutation if any index is out of bounds. Removing every line leaves
    /// the single-empty-line buffer.
    pub fn delete_lines(&mut self, indices: &BTreeSet<usize>) -> Result<(), BufferError> {
        let max = match indices.iter().next_back() {
            Some(&max) => max,
            None => return Ok(()),
        };
        if max >= self.lines.len() {
            return Err(BufferError::OutOfRange {
                index: max,
                len: self.lines.len(),
            });
        }

        let mut index = 0;
        self.lines.retain(|_| {
            let keep = !indices.contains(&index);
            index += 1;
            keep
        });
        self.ensure_non_empty();

        Ok(())
    }

    /// Replaces the entire buffer content.
    ///
    /// This is the wholesale-replacement path used when a merged suggestion
    /// buffer is installed; ordinary edits must go through `apply_edit`.
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.ensure_non_empty();
    }

    fn ensure_non_empty(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn buffer(lines: &[&str]) -> TextBuffer {
        TextBuffer::from_lines(lines.iter().map(|s| s.to_string()).collect())
    }

    fn event(from: usize, to: usize, inserted: &[&str]) -> EditEvent {
        EditEvent::new(
            Position::new(from, 0),
            Position::new(to, 0),
            inserted.iter().map(|s| s.to_string()).collect(),
        )
    }

    // ==================== Construction ====================

    #[test]
    fn new_buffer_has_one_empty_line() {
        let buf = TextBuffer::new();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line(0), Some(""));
        assert!(buf.is_empty());
    }

    #[test]
    fn from_empty_lines_normalizes_to_one_empty_line() {
        let buf = TextBuffer::from_lines(vec![]);
        assert_eq!(buf.line_count(), 1);
        assert!(buf.is_empty());
    }

    #[test]
    fn from_lines_preserves_content_and_order() {
        let buf = buffer(&["a", "b", "c"]);
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line(1), Some("b"));
        assert_eq!(buf.content(), "a\nb\nc");
    }

    #[test]
    fn line_out_of_bounds_is_none() {
        let buf = buffer(&["a"]);
        assert_eq!(buf.line(1), None);
    }

    // ==================== apply_edit: insertion shapes ====================

    #[test]
    fn single_line_content_edit_is_zero_count_insertion() {
        let mut buf = buffer(&["hello", "world"]);
        let shape = buf.apply_edit(&event(1, 1, &["world!"])).unwrap();
        assert_eq!(
            shape,
            EditShape::Insertion {
                at_line: 1,
                count: 0
            }
        );
        assert_eq!(buf.lines(), &["hello", "world!"]);
    }

    #[test]
    fn newline_press_is_single_count_insertion() {
        // Pressing Enter mid-line splits it: one line becomes two.
        let mut buf = buffer(&["helloworld"]);
        let shape = buf.apply_edit(&event(0, 0, &["hello", "world"])).unwrap();
        assert_eq!(
            shape,
            EditShape::Insertion {
                at_line: 0,
                count: 1
            }
        );
        assert_eq!(buf.lines(), &["hello", "world"]);
    }

    #[test]
    fn multi_line_paste_reports_added_line_count() {
        let mut buf = buffer(&["a", "b"]);
        let shape = buf.apply_edit(&event(0, 0, &["a", "x", "y", "z"])).unwrap();
        assert_eq!(
            shape,
            EditShape::Insertion {
                at_line: 0,
                count: 3
            }
        );
        assert_eq!(buf.line_count(), 5);
        assert_eq!(buf.lines(), &["a", "x", "y", "z", "b"]);
    }

    // ==================== apply_edit: deletion shapes ====================

    #[test]
    fn joining_lines_is_deletion() {
        // Backspace at line start joins two lines into one.
        let mut buf = buffer(&["hello", "world", "tail"]);
        let shape = buf.apply_edit(&event(0, 1, &["helloworld"])).unwrap();
        assert_eq!(
            shape,
            EditShape::Deletion {
                from_line: 0,
                to_line: 1,
                count: 1
            }
        );
        assert_eq!(buf.lines(), &["helloworld", "tail"]);
    }

    #[test]
    fn spanning_delete_reports_range_and_count() {
        let mut buf = buffer(&["a", "b", "c", "d", "e"]);
        let shape = buf.apply_edit(&event(1, 3, &["bd"])).unwrap();
        assert_eq!(
            shape,
            EditShape::Deletion {
                from_line: 1,
                to_line: 3,
                count: 2
            }
        );
        assert_eq!(buf.lines(), &["a", "bd", "e"]);
    }

    #[test]
    fn mixed_edit_classifies_as_deletion_discarding_inserts() {
        // Replace a 3-line range with 2 lines: net -1, reported as count 2.
        let mut buf = buffer(&["a", "b", "c", "d"]);
        let shape = buf.apply_edit(&event(0, 2, &["x", "y"])).unwrap();
        assert_eq!(
            shape,
            EditShape::Deletion {
                from_line: 0,
                to_line: 2,
                count: 2
            }
        );
        assert_eq!(buf.lines(), &["x", "y", "d"]);
    }

    #[test]
    fn empty_inserted_lines_normalize_to_one_empty_line() {
        let mut buf = buffer(&["a", "b", "c"]);
        let shape = buf.apply_edit(&event(0, 2, &[])).unwrap();
        assert_eq!(
            shape,
            EditShape::Deletion {
                from_line: 0,
                to_line: 2,
                count: 2
            }
        );
        assert_eq!(buf.lines(), &[""]);
    }

    // ==================== apply_edit: errors ====================

    #[test]
    fn edit_past_end_fails_without_mutation() {
        let mut buf = buffer(&["a", "b"]);
        let before = buf.clone();
        let err = buf.apply_edit(&event(1, 2, &["x"])).unwrap_err();
        assert_eq!(err, BufferError::OutOfRange { index: 2, len: 2 });
        assert_eq!(buf, before, "failed edit must not mutate the buffer");
    }

    #[test]
    fn inverted_range_fails_without_mutation() {
        let mut buf = buffer(&["a", "b", "c"]);
        let before = buf.clone();
        let err = buf.apply_edit(&event(2, 1, &["x"])).unwrap_err();
        assert_eq!(err, BufferError::InvertedRange { from: 2, to: 1 });
        assert_eq!(buf, before);
    }

    // ==================== delete_lines ====================

    #[test]
    fn delete_lines_removes_exact_indices() {
        let mut buf = buffer(&["a", "b", "c", "d", "e"]);
        let indices: BTreeSet<usize> = [1, 3].into_iter().collect();
        buf.delete_lines(&indices).unwrap();
        assert_eq!(buf.lines(), &["a", "c", "e"]);
    }

    #[test]
    fn delete_lines_with_empty_set_is_noop() {
        let mut buf = buffer(&["a", "b"]);
        buf.delete_lines(&BTreeSet::new()).unwrap();
        assert_eq!(buf.lines(), &["a", "b"]);
    }

    #[test]
    fn delete_all_lines_leaves_single_empty_line() {
        let mut buf = buffer(&["a", "b"]);
        let indices: BTreeSet<usize> = [0, 1].into_iter().collect();
        buf.delete_lines(&indices).unwrap();
        assert_eq!(buf.line_count(), 1);
        assert!(buf.is_empty());
    }

    #[test]
    fn delete_lines_out_of_bounds_fails_without_mutation() {
        let mut buf = buffer(&["a", "b"]);
        let before = buf.clone();
        let indices: BTreeSet<usize> = [0, 5].into_iter().collect();
        let err = buf.delete_lines(&indices).unwrap_err();
        assert_eq!(err, BufferError::OutOfRange { index: 5, len: 2 });
        assert_eq!(buf, before, "failed delete must not mutate the buffer");
    }

    // ==================== set_lines ====================

    #[test]
    fn set_lines_replaces_content_wholesale() {
        let mut buf = buffer(&["a"]);
        buf.set_lines(vec!["x".into(), "y".into()]);
        assert_eq!(buf.lines(), &["x", "y"]);
    }

    #[test]
    fn set_lines_empty_normalizes() {
        let mut buf = buffer(&["a"]);
        buf.set_lines(vec![]);
        assert!(buf.is_empty());
    }
}
