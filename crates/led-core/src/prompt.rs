//! Prompt line — the one-line answer box at the bottom of the screen.
//!
//! Commands that need an argument open a prompt: a text prompt (`:`) for
//! append, insert, search, save and load, or an integer prompt (`>`) for
//! counts, offsets and line numbers. Enter submits, Escape submits an empty
//! answer, which every command treats as "canceled" or "nothing to do".
//!
//! The sigil is not stored; the view paints it.

use led_term::buffer::string_width;

use crate::limits::LINE_CAPACITY;
use crate::line::normalize_input;

// ---------------------------------------------------------------------------
// PromptKind
// ---------------------------------------------------------------------------

/// What kind of answer a prompt expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Free text.
    Text,
    /// A count, offset or line number.
    Integer,
}

impl PromptKind {
    /// The character painted in front of the input.
    #[must_use]
    pub const fn sigil(self) -> char {
        match self {
            Self::Text => ':',
            Self::Integer => '>',
        }
    }
}

// ---------------------------------------------------------------------------
// PromptLine
// ---------------------------------------------------------------------------

/// The prompt input buffer.
///
/// Holds at most [`LINE_CAPACITY`] bytes, the most a line can store.
/// The cursor is a char offset into the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLine {
    kind: PromptKind,
    input: String,
    cursor: usize,
}

impl PromptLine {
    #[must_use]
    pub const fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
            cursor: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> PromptKind {
        self.kind
    }

    /// The raw input, as typed.
    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Cursor position within the input (char offset).
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display column of the cursor, relative to the start of the input.
    #[must_use]
    pub fn cursor_column(&self) -> usize {
        let byte_idx = self.char_to_byte(self.cursor);
        string_width(&self.input[..byte_idx])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    // ---------------------------------------------------------------------
    // Editing
    // ---------------------------------------------------------------------

    /// Insert `ch` at the cursor. Returns `false` if the prompt is full.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.input.len() + ch.len_utf8() > LINE_CAPACITY {
            return false;
        }
        let byte_idx = self.char_to_byte(self.cursor);
        self.input.insert(byte_idx, ch);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor.
    /// Returns `true` if a character was deleted.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let byte_idx = self.char_to_byte(self.cursor);
        self.input.remove(byte_idx);
        true
    }

    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    // ---------------------------------------------------------------------
    // Answers
    // ---------------------------------------------------------------------

    /// The answer as line content: tabs become spaces and a trailing line
    /// break is dropped.
    #[must_use]
    pub fn text(&self) -> Vec<u8> {
        normalize_input(self.input.as_bytes())
    }

    /// The answer as an integer, `0` if it does not start with one.
    #[must_use]
    pub fn integer(&self) -> i64 {
        parse_integer(&self.input)
    }

    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map_or(self.input.len(), |(byte_idx, _)| byte_idx)
    }
}

/// Parse a leading integer the way C's `atoi` does: skip whitespace, take
/// an optional sign and as many digits as follow. Anything else is `0`.
/// Out-of-range values saturate.
#[must_use]
pub fn parse_integer(input: &str) -> i64 {
    let s = input.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(digit - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }
    value
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed(kind: PromptKind, text: &str) -> PromptLine {
        let mut p = PromptLine::new(kind);
        for ch in text.chars() {
            p.insert_char(ch);
        }
        p
    }

    #[test]
    fn new_is_empty() {
        let p = PromptLine::new(PromptKind::Text);
        assert!(p.is_empty());
        assert_eq!(p.cursor(), 0);
        assert_eq!(p.kind().sigil(), ':');
        assert_eq!(PromptKind::Integer.sigil(), '>');
    }

    #[test]
    fn insert_in_middle() {
        let mut p = typed(PromptKind::Text, "wq");
        p.move_left();
        p.insert_char('!');
        assert_eq!(p.input(), "w!q");
        assert_eq!(p.cursor(), 2);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut p = typed(PromptKind::Text, "ab");
        p.move_home();
        assert!(!p.backspace());
        p.move_end();
        assert!(p.backspace());
        assert_eq!(p.input(), "a");
    }

    #[test]
    fn move_right_stops_at_end() {
        let mut p = typed(PromptKind::Text, "ab");
        p.move_right();
        assert_eq!(p.cursor(), 2);
    }

    #[test]
    fn input_is_capped_at_line_capacity() {
        let mut p = PromptLine::new(PromptKind::Text);
        for _ in 0..LINE_CAPACITY {
            assert!(p.insert_char('x'));
        }
        assert!(!p.insert_char('y'));
        assert_eq!(p.input().len(), LINE_CAPACITY);
    }

    #[test]
    fn cursor_column_counts_wide_chars() {
        let p = typed(PromptKind::Text, "a中b");
        assert_eq!(p.cursor_column(), 4);
    }

    #[test]
    fn text_is_normalized() {
        let p = typed(PromptKind::Text, "a\tb");
        assert_eq!(p.text(), b"a b");
    }

    #[test]
    fn clear_resets() {
        let mut p = typed(PromptKind::Integer, "12");
        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.integer(), 0);
    }

    #[test]
    fn integer_parses_like_atoi() {
        assert_eq!(parse_integer("42"), 42);
        assert_eq!(parse_integer("  -7"), -7);
        assert_eq!(parse_integer("+3abc"), 3);
        assert_eq!(parse_integer("abc"), 0);
        assert_eq!(parse_integer(""), 0);
        assert_eq!(parse_integer("-"), 0);
        assert_eq!(parse_integer("1 2"), 1);
        assert_eq!(parse_integer("99999999999999999999999"), i64::MAX);
        assert_eq!(parse_integer("-99999999999999999999999"), i64::MIN);
    }

    #[test]
    fn integer_prompt_answer() {
        assert_eq!(typed(PromptKind::Integer, "15").integer(), 15);
    }
}
