// Chunk: docs/chunks/line_buffer - Line-granularity buffer with edit shape reporting

//! Integration tests for realistic editing sequences.
//!
//! These tests drive the buffer the way a host editing surface does: one
//! edit event per user-visible change, checking content and the reported
//! edit shapes along the way.

use std::collections::BTreeSet;

use redline_buffer::{EditEvent, EditShape, Position, TextBuffer};

fn lines(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}

fn event(from: usize, to: usize, inserted: &[&str]) -> EditEvent {
    EditEvent::new(Position::new(from, 0), Position::new(to, 0), lines(inserted))
}

#[test]
fn test_type_then_split_then_join() {
    let mut buf = TextBuffer::from_lines(lines(&["fn main() {}"]));

    // Type inside the line: no line-count change
    let shape = buf.apply_edit(&event(0, 0, &["fn main() { }"])).unwrap();
    assert!(shape.is_line_noop());

    // Press Enter inside the braces
    let shape = buf
        .apply_edit(&event(0, 0, &["fn main() {", "}"]))
        .unwrap();
    assert_eq!(
        shape,
        EditShape::Insertion {
            at_line: 0,
            count: 1
        }
    );
    assert_eq!(buf.lines(), &["fn main() {", "}"]);

    // Backspace the newline away again
    let shape = buf.apply_edit(&event(0, 1, &["fn main() {}"])).unwrap();
    assert_eq!(
        shape,
        EditShape::Deletion {
            from_line: 0,
            to_line: 1,
            count: 1
        }
    );
    assert_eq!(buf.lines(), &["fn main() {}"]);
}

#[test]
fn test_paste_block_then_delete_it() {
    let mut buf = TextBuffer::from_lines(lines(&["top", "bottom"]));

    // Paste three lines at line 1
    let shape = buf
        .apply_edit(&event(1, 1, &["one", "two", "three", "bottom"]))
        .unwrap();
    assert_eq!(shape.line_delta(), 3);
    assert_eq!(buf.lines(), &["top", "one", "two", "three", "bottom"]);

    // Select the pasted block plus the line below and delete down to one line
    let shape = buf.apply_edit(&event(1, 4, &["bottom"])).unwrap();
    assert_eq!(shape.line_delta(), -3);
    assert_eq!(buf.lines(), &["top", "bottom"]);
}

#[test]
fn test_line_count_tracks_shape_deltas() {
    let mut buf = TextBuffer::from_lines(lines(&["a", "b", "c", "d"]));
    let mut expected = buf.line_count() as isize;

    let edits = [
        event(0, 0, &["a", "a2"]),
        event(2, 3, &["bc"]),
        event(1, 1, &["a2", "x", "y"]),
        event(0, 4, &["all"]),
    ];

    for edit in &edits {
        let shape = buf.apply_edit(edit).unwrap();
        expected += shape.line_delta();
        assert_eq!(
            buf.line_count() as isize,
            expected,
            "line count must track the reported shape delta"
        );
    }
}

#[test]
fn test_resolver_style_scattered_delete() {
    let mut buf = TextBuffer::from_lines(lines(&["keep", "drop", "keep", "drop", "drop", "keep"]));
    let indices: BTreeSet<usize> = [1, 3, 4].into_iter().collect();

    buf.delete_lines(&indices).unwrap();

    assert_eq!(buf.lines(), &["keep", "keep", "keep"]);
}

#[test]
fn test_failed_event_leaves_sequence_resumable() {
    let mut buf = TextBuffer::from_lines(lines(&["a", "b"]));

    // A stale event that refers past the end is rejected...
    assert!(buf.apply_edit(&event(0, 5, &["x"])).is_err());

    // ...and the next valid event applies normally.
    let shape = buf.apply_edit(&event(1, 1, &["b2"])).unwrap();
    assert!(shape.is_line_noop());
    assert_eq!(buf.lines(), &["a", "b2"]);
}
