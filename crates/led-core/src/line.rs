//! Line — one capacity-bounded byte string.
//!
//! Content is treated as single-byte characters: offsets, lengths and the
//! capacity are all in bytes. A line never holds a tab or a line break;
//! input goes through [`normalize_input`] before it gets here.

use std::borrow::Cow;

use crate::limits::LINE_CAPACITY;

/// A single line of the document, at most [`LINE_CAPACITY`] bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    bytes: Vec<u8>,
}

impl Line {
    /// An empty line.
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// A line holding `bytes`, truncated to capacity.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let keep = bytes.len().min(LINE_CAPACITY);
        Self {
            bytes: bytes[..keep].to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes that can still be added before the line is full.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        LINE_CAPACITY - self.bytes.len()
    }

    /// The content for display. Invalid UTF-8 shows as U+FFFD.
    #[must_use]
    pub fn display(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Append as much of `text` as fits. Returns `false` if anything was cut.
    pub fn push_truncated(&mut self, text: &[u8]) -> bool {
        let fits = text.len().min(self.remaining());
        self.bytes.extend_from_slice(&text[..fits]);
        fits == text.len()
    }

    /// Shift `offset..` right and place as much of `text` as fits at
    /// `offset`. Returns `false` if anything was cut.
    ///
    /// # Panics
    ///
    /// Panics if `offset > self.len()`; callers validate offsets first.
    pub fn insert_truncated(&mut self, offset: usize, text: &[u8]) -> bool {
        let fits = text.len().min(self.remaining());
        self.bytes
            .splice(offset..offset, text[..fits].iter().copied());
        fits == text.len()
    }

    /// Remove the last byte, if any.
    pub fn pop(&mut self) -> Option<u8> {
        self.bytes.pop()
    }

    /// Whether `needle` occurs in the line as a literal byte substring.
    #[must_use]
    pub fn contains(&self, needle: &[u8]) -> bool {
        needle.is_empty() || self.bytes.windows(needle.len()).any(|w| w == needle)
    }
}

/// Prepare typed or loaded text for storage: every tab becomes a space and
/// one trailing line break is stripped.
#[must_use]
pub fn normalize_input(bytes: &[u8]) -> Vec<u8> {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.iter()
        .map(|&b| if b == b'\t' { b' ' } else { b })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_bytes_truncates() {
        let long = vec![b'x'; LINE_CAPACITY + 10];
        let line = Line::from_bytes(&long);
        assert_eq!(line.len(), LINE_CAPACITY);
        assert_eq!(line.remaining(), 0);
    }

    #[test]
    fn push_truncated_reports_cut() {
        let mut line = Line::from_bytes(&vec![b'a'; LINE_CAPACITY - 2]);
        assert!(!line.push_truncated(b"xyz"));
        assert_eq!(line.len(), LINE_CAPACITY);
        assert!(line.as_bytes().ends_with(b"xy"));
    }

    #[test]
    fn push_into_full_line_is_cut() {
        let mut line = Line::from_bytes(&vec![b'a'; LINE_CAPACITY]);
        assert!(!line.push_truncated(b"b"));
        assert!(line.push_truncated(b""));
    }

    #[test]
    fn insert_shifts_tail() {
        let mut line = Line::from_bytes(b"hello");
        assert!(line.insert_truncated(2, b"XY"));
        assert_eq!(line.as_bytes(), b"heXYllo");
        assert!(line.insert_truncated(7, b"!"));
        assert_eq!(line.as_bytes(), b"heXYllo!");
        assert!(line.insert_truncated(0, b">"));
        assert_eq!(line.as_bytes(), b">heXYllo!");
    }

    #[test]
    fn insert_overflow_keeps_prefix() {
        let mut line = Line::from_bytes(&vec![b'a'; LINE_CAPACITY - 1]);
        assert!(!line.insert_truncated(0, b"XY"));
        assert_eq!(line.len(), LINE_CAPACITY);
        assert_eq!(line.as_bytes()[0], b'X');
        assert_eq!(line.as_bytes()[1], b'a');
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut line = Line::from_bytes(b"ab");
        assert_eq!(line.pop(), Some(b'b'));
        assert_eq!(line.pop(), Some(b'a'));
        assert_eq!(line.pop(), None);
    }

    #[test]
    fn contains_is_literal_and_case_sensitive() {
        let line = Line::from_bytes(b"foobar");
        assert!(line.contains(b"bar"));
        assert!(line.contains(b"oob"));
        assert!(!line.contains(b"Bar"));
        assert!(!line.contains(b"b.r"));
        assert!(!Line::new().contains(b"x"));
    }

    #[test]
    fn display_is_lossy() {
        let line = Line::from_bytes(b"ok\xff");
        assert_eq!(line.display(), "ok\u{fffd}");
    }

    #[test]
    fn normalize_replaces_tabs_and_one_newline() {
        assert_eq!(normalize_input(b"a\tb\t\n"), b"a b ");
        assert_eq!(normalize_input(b"x\n\n"), b"x\n");
        assert_eq!(normalize_input(b""), b"");
        assert_eq!(normalize_input(b"plain"), b"plain");
    }
}
