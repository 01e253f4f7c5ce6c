//! Document — the line buffer and every edit that can be made to it.
//!
//! A document is an ordered list of [`Line`]s with a cursor on exactly one
//! of them. It is never empty: a fresh document holds one blank line, and
//! deleting the last remaining line only clears it.
//!
//! # Invariants
//!
//! - `1 <= line_count() <= MAX_LINE`
//! - `cursor() < line_count()`, after every call, successful or not
//! - every line holds at most `LINE_CAPACITY` bytes
//!
//! Counts, offsets and line numbers come from integer prompts and may be
//! zero or negative, so they arrive as `i64` and are validated here.
//!
//! Search lives in [`search`](crate::search) and load/save in
//! [`file`](crate::file); both extend `Document` with further methods.

use tracing::debug;

use crate::limits::{MAX_INSERT_OFFSET, MAX_INSERTABLE_WIDTH, MAX_LINE};
use crate::line::Line;
use crate::search::SearchState;
use crate::status::EditError;

/// The document being edited.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) lines: Vec<Line>,
    pub(crate) cursor: usize,
    pub(crate) search: SearchState,
}

impl Document {
    /// A document with one blank line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
            cursor: 0,
            search: SearchState::default(),
        }
    }

    /// Build a document from existing lines (at least one is kept).
    ///
    /// Lines beyond [`MAX_LINE`] are dropped.
    #[must_use]
    pub fn from_lines<I, B>(lines: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut lines: Vec<Line> = lines
            .into_iter()
            .take(MAX_LINE)
            .map(|l| Line::from_bytes(l.as_ref()))
            .collect();
        if lines.is_empty() {
            lines.push(Line::new());
        }
        Self {
            lines,
            cursor: 0,
            search: SearchState::default(),
        }
    }

    /// Drop everything: one blank line, cursor at the top, no search.
    pub fn reset(&mut self) {
        debug!(lines = self.lines.len(), "document reset");
        *self = Self::new();
    }

    // ---------------------------------------------------------------------
    // Access
    // ---------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Index of the current line (0-based).
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// The current line.
    #[must_use]
    pub fn current(&self) -> &Line {
        &self.lines[self.cursor]
    }

    /// Line `index`, or `None` past the end.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// All lines in order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.lines.len() >= MAX_LINE
    }

    fn current_mut(&mut self) -> &mut Line {
        &mut self.lines[self.cursor]
    }

    // ---------------------------------------------------------------------
    // Line mutation
    // ---------------------------------------------------------------------

    /// Append `text` to the current line.
    ///
    /// Whatever fits is appended even when the rest does not; the cut is
    /// then reported as [`EditError::LineTooLong`].
    ///
    /// # Errors
    ///
    /// [`EditError::LineTooLong`] if the line was full or `text` did not fit.
    pub fn append(&mut self, text: &[u8]) -> Result<(), EditError> {
        let cursor = self.cursor;
        let line = self.current_mut();
        let was_full = line.remaining() == 0;
        let complete = line.push_truncated(text);
        debug!(cursor, len = line.len(), complete, "append");
        if was_full || !complete {
            return Err(EditError::LineTooLong);
        }
        Ok(())
    }

    /// Whether the insert command may work on the current line at all.
    ///
    /// The shell checks this before asking for an offset.
    ///
    /// # Errors
    ///
    /// [`EditError::NotInsertable`] if the line is wider than
    /// [`MAX_INSERTABLE_WIDTH`], [`EditError::NothingToDo`] if it is empty.
    pub fn check_insertable(&self) -> Result<(), EditError> {
        let line = self.current();
        if line.len() > MAX_INSERTABLE_WIDTH {
            return Err(EditError::NotInsertable);
        }
        if line.is_empty() {
            return Err(EditError::NothingToDo);
        }
        Ok(())
    }

    /// Insert `text` into the current line at byte `offset`.
    ///
    /// Empty `text` is a canceled insert and succeeds without change.
    ///
    /// # Errors
    ///
    /// - [`EditError::NotInsertable`] / [`EditError::NothingToDo`] as for
    ///   [`check_insertable`](Self::check_insertable)
    /// - [`EditError::NothingToDo`] if `offset` is negative, beyond
    ///   [`MAX_INSERT_OFFSET`], or beyond the end of the line
    /// - [`EditError::LineTooLong`] if only part of `text` fitted (that part
    ///   was inserted)
    pub fn insert_at(&mut self, offset: i64, text: &[u8]) -> Result<(), EditError> {
        self.check_insertable()?;

        let offset = usize::try_from(offset)
            .ok()
            .filter(|&o| o <= MAX_INSERT_OFFSET && o <= self.current().len())
            .ok_or(EditError::NothingToDo)?;

        if text.is_empty() {
            return Ok(());
        }

        let cursor = self.cursor;
        let complete = self.current_mut().insert_truncated(offset, text);
        debug!(cursor, offset, complete, "insert");
        if complete {
            Ok(())
        } else {
            Err(EditError::LineTooLong)
        }
    }

    /// Remove the last character of the current line. No-op when empty.
    pub fn backspace(&mut self) {
        self.current_mut().pop();
    }

    // ---------------------------------------------------------------------
    // Document mutation
    // ---------------------------------------------------------------------

    /// Open a blank line right after the cursor and move onto it.
    ///
    /// # Errors
    ///
    /// [`EditError::TooManyLines`] if the document is full.
    pub fn new_line_after_cursor(&mut self) -> Result<(), EditError> {
        if self.is_full() {
            return Err(EditError::TooManyLines);
        }
        self.shift_right_from(self.cursor + 1);
        self.cursor += 1;
        debug!(cursor = self.cursor, lines = self.lines.len(), "new line");
        Ok(())
    }

    /// Delete `count` lines starting at the cursor.
    ///
    /// Each step clears the current line and, while more than one line
    /// remains, removes it. The cursor stays put unless it was on the last
    /// line, in which case it moves up. Deleting more lines than exist
    /// stops at a single blank line.
    ///
    /// # Errors
    ///
    /// [`EditError::NothingToDo`] if `count <= 0`.
    pub fn delete_current(&mut self, count: i64) -> Result<(), EditError> {
        if count <= 0 {
            return Err(EditError::NothingToDo);
        }
        for _ in 0..count {
            self.current_mut().clear();
            if self.lines.len() == 1 {
                break;
            }
            self.shift_left_onto(self.cursor);
            if self.cursor == self.lines.len() {
                self.cursor -= 1;
            }
        }
        debug!(count, cursor = self.cursor, lines = self.lines.len(), "delete");
        Ok(())
    }

    /// Make room for a blank line at `index`, moving `index..` down one slot.
    fn shift_right_from(&mut self, index: usize) {
        self.lines.insert(index, Line::new());
    }

    /// Remove the line at `index`, moving `index+1..` up one slot.
    fn shift_left_onto(&mut self, index: usize) {
        self.lines.remove(index);
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Move the cursor by `delta` lines, clamped to the document.
    pub fn move_relative(&mut self, delta: i64) {
        let last = self.lines.len() - 1;
        let magnitude = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);
        self.cursor = if delta < 0 {
            self.cursor.saturating_sub(magnitude)
        } else {
            self.cursor.saturating_add(magnitude).min(last)
        };
    }

    /// Move up `count` lines, stopping at the first.
    ///
    /// # Errors
    ///
    /// [`EditError::NothingToDo`] if `count <= 0`.
    pub fn prev(&mut self, count: i64) -> Result<(), EditError> {
        if count <= 0 {
            return Err(EditError::NothingToDo);
        }
        self.move_relative(-count);
        Ok(())
    }

    /// Move down `count` lines, stopping at the last.
    ///
    /// # Errors
    ///
    /// [`EditError::NothingToDo`] if `count <= 0`.
    pub fn next(&mut self, count: i64) -> Result<(), EditError> {
        if count <= 0 {
            return Err(EditError::NothingToDo);
        }
        self.move_relative(count);
        Ok(())
    }

    pub const fn goto_head(&mut self) {
        self.cursor = 0;
    }

    pub fn goto_tail(&mut self) {
        self.cursor = self.lines.len() - 1;
    }

    /// Jump to 1-based line `n`.
    ///
    /// # Errors
    ///
    /// [`EditError::NothingToDo`] if `n <= 0`, [`EditError::NoSuchLine`] if
    /// `n` is past the last line.
    pub fn goto_line(&mut self, n: i64) -> Result<(), EditError> {
        if n <= 0 {
            return Err(EditError::NothingToDo);
        }
        let index = usize::try_from(n - 1).map_err(|_| EditError::NoSuchLine)?;
        if index >= self.lines.len() {
            return Err(EditError::NoSuchLine);
        }
        self.cursor = index;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
