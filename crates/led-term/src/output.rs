// SPDX-License-Identifier: MIT
//
// Frame output — the text of one render pass.
//
// The diff renderer hands changed cells to `FrameOutput::put` one by one.
// `FrameOutput` knows where the terminal cursor will be and which style the
// terminal is in once everything so far has been written, so a run of
// same-styled cells on one row costs a single cursor move and a single SGR.
// The whole frame goes to the terminal in one write.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::ansi::{Control, Sgr};
use crate::buffer::char_width;
use crate::cell::{Cell, Style};

/// Room for a full 80×24 screen of styled text.
const INITIAL_CAPACITY: usize = 8_192;

// ─── FrameOutput ─────────────────────────────────────────────────────────────

/// Escape sequences and glyphs for one frame, plus what the terminal state
/// will be after them.
pub struct FrameOutput {
    /// Everything queued for the terminal.
    text: String,
    /// Cursor position once `text` is written; `None` when unknown.
    cursor: Option<(u16, u16)>,
    /// Style in effect once `text` is written; `None` when unknown.
    style: Option<Style>,
}

impl FrameOutput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: String::with_capacity(INITIAL_CAPACITY),
            cursor: None,
            style: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Drop the queued text and forget the tracked terminal state.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = None;
        self.style = None;
    }

    /// Queue a control sequence.
    pub fn control(&mut self, control: Control) {
        // Formatting into a String cannot fail.
        let _ = write!(self.text, "{control}");
        match control {
            Control::MoveTo(x, y) => self.cursor = Some((x, y)),
            Control::ResetStyle => self.style = Some(Style::PLAIN),
            _ => {}
        }
    }

    fn select(&mut self, style: Style) {
        if self.style != Some(style) {
            let _ = write!(self.text, "{}", Sgr(style));
            self.style = Some(style);
        }
    }

    /// Queue `cell` at `(x, y)`.
    ///
    /// A continuation cell right behind the wide glyph that owns it writes
    /// nothing; the glyph already covers both columns. A stray one, whose
    /// owner was not redrawn, is blanked with its style.
    pub fn put(&mut self, x: u16, y: u16, cell: Cell) {
        if cell.is_continuation() && self.cursor == Some((x.saturating_add(1), y)) {
            return;
        }
        if self.cursor != Some((x, y)) {
            self.control(Control::MoveTo(x, y));
        }
        self.select(cell.style());

        let glyph = if cell.is_continuation() {
            ' '
        } else {
            cell.character().unwrap_or('?')
        };
        self.text.push(glyph);

        let advance = u16::try_from(char_width(glyph)).unwrap_or(u16::MAX);
        self.cursor = Some((x.saturating_add(advance), y));
    }

    /// Write the queued text to `w`, flush it, and empty the queue. The
    /// tracked state is kept: it describes the terminal after this write.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn write_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.text.is_empty() {
            w.write_all(self.text.as_bytes())?;
            w.flush()?;
            self.text.clear();
        }
        Ok(())
    }
}

impl Default for FrameOutput {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
