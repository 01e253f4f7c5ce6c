// SPDX-License-Identifier: MIT
//
// FrameBuffer — the 2D cell grid that everything paints to.
//
// Every character position on screen is a cell in this buffer. The line
// window, status line, prompts and full-screen pages all paint here. The
// diff renderer then compares this frame against the previous one and emits
// minimal ANSI escape sequences for the changes.
//
// Design:
//
//   - Flat `Vec<Cell>` with row-major indexing. A row's cells are
//     contiguous in memory, so left-to-right iteration (which the renderer
//     does) is a linear scan.
//
//   - Painting past the right edge or below the bottom is silently clipped.
//     Small terminals show less of the screen; they never panic.
//
//   - Wide characters (CJK, some emoji) occupy two columns. The first cell
//     holds the codepoint; the second is a continuation cell (ch = 0).
//     Paint methods handle continuation cell creation and wide-char cleanup.

use unicode_width::UnicodeWidthChar;

use crate::cell::{Cell, Style};

// ─── FrameBuffer ────────────────────────────────────────────────────────────────

/// A 2D buffer of terminal cells — the canvas everything paints to.
///
/// # Examples
///
/// ```
/// use led_term::buffer::FrameBuffer;
/// use led_term::cell::Cell;
///
/// let mut buf = FrameBuffer::new(80, 24);
/// assert_eq!(buf.width(), 80);
/// assert_eq!(buf.height(), 24);
///
/// buf.set(5, 3, Cell::new('X'));
/// assert_eq!(buf.get(5, 3).unwrap().character(), Some('X'));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    // ─── Construction ────────────────────────────────────────────────────

    /// Create a buffer filled with empty cells (space, default colors).
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; size],
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Buffer width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whether `(x, y)` is within the buffer.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a cell reference, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// A single row as a slice. Returns `None` if `y` is out of bounds.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            Some(&self.cells[start..start + usize::from(self.width)])
        } else {
            None
        }
    }

    /// The visible text of row `y`, continuation cells skipped and
    /// trailing spaces trimmed. Empty for out-of-bounds rows.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let Some(row) = self.row(y) else {
            return String::new();
        };
        let text: String = row.iter().filter_map(|c| c.character()).collect();
        text.trim_end().to_owned()
    }

    // ─── Clear & Resize ──────────────────────────────────────────────────

    /// Clear the buffer to empty cells.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize the buffer, clearing all content.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let size = usize::from(width) * usize::from(height);
        self.cells.clear();
        self.cells.resize(size, Cell::EMPTY);
    }

    // ─── Direct Cell Access ──────────────────────────────────────────────

    /// Write a cell directly to the buffer.
    ///
    /// No clipping beyond bounds, no wide-char cleanup. Returns `true` if
    /// the position was in bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    // ─── Wide Character Cleanup ──────────────────────────────────────────

    /// Break any wide character that touches position `(x, y)`.
    fn break_wide_char_at(&mut self, x: u16, y: u16) {
        let idx = self.index(x, y);

        if self.cells[idx].is_continuation() && x > 0 {
            let prev = self.index(x - 1, y);
            self.cells[prev].ch = u32::from(b' ');
        }

        if x + 1 < self.width {
            let next = self.index(x + 1, y);
            if self.cells[next].is_continuation() {
                self.cells[next] = Cell::EMPTY;
            }
        }
    }

    // ─── Painting ───────────────────────────────────────────────────────

    /// Paint one character. Returns `true` if it landed in bounds.
    pub fn paint_cell(&mut self, x: u16, y: u16, ch: char, style: Style) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        self.break_wide_char_at(x, y);
        let idx = self.index(x, y);
        self.cells[idx] = Cell::styled(ch, style);
        true
    }

    /// Paint `width` spaces in `style` starting at `(x, y)`.
    pub fn fill(&mut self, x: u16, y: u16, width: u16, style: Style) {
        let end = x.saturating_add(width).min(self.width);
        for col in x..end {
            self.paint_cell(col, y, ' ', style);
        }
    }

    /// Paint a text string with wide-character handling.
    ///
    /// Characters are placed left-to-right starting at `(x, y)`. Wide
    /// characters occupy two columns; a continuation cell is placed at
    /// `x+1`. Zero-width and control characters are skipped.
    ///
    /// If a wide character doesn't fit at the right edge, a space is
    /// painted instead.
    ///
    /// Returns the number of columns consumed.
    pub fn paint_text(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        if y >= self.height {
            return 0;
        }

        let mut col = x;

        for ch in text.chars() {
            if col >= self.width {
                break;
            }

            let char_w = ch.width().unwrap_or(0);
            if char_w == 0 {
                continue;
            }

            let is_wide = char_w == 2;

            if is_wide && col + 1 >= self.width {
                self.paint_cell(col, y, ' ', style);
                col += 1;
                break;
            }

            if self.paint_cell(col, y, ch, style) && is_wide {
                let cont_x = col + 1;
                self.break_wide_char_at(cont_x, y);
                let cont_idx = self.index(cont_x, y);
                self.cells[cont_idx] = Cell::continuation(style);
            }

            // char_w is 1 or 2.
            #[allow(clippy::cast_possible_truncation)]
            let w = char_w as u16;
            col = col.saturating_add(w);
        }

        col.saturating_sub(x)
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", self.width, self.height)
    }
}

// ─── Text Width Utilities ───────────────────────────────────────────────────────

/// Display width of a character in terminal columns.
///
/// ```
/// use led_term::buffer::char_width;
///
/// assert_eq!(char_width('a'), 1);
/// assert_eq!(char_width('中'), 2);
/// assert_eq!(char_width('\n'), 0);
/// ```
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Display width of a string in terminal columns.
///
/// ```
/// use led_term::buffer::string_width;
///
/// assert_eq!(string_width("hello"), 5);
/// assert_eq!(string_width("a中b"), 4);
/// ```
#[must_use]
pub fn string_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

// ─── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Attr;
    use crate::color::CellColor;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_buffer_is_blank() {
        let buf = FrameBuffer::new(10, 3);
        assert_eq!(buf.get(9, 2), Some(&Cell::EMPTY));
        assert_eq!(buf.get(10, 0), None);
        assert_eq!(buf.row_text(1), "");
    }

    #[test]
    fn set_out_of_bounds_is_rejected() {
        let mut buf = FrameBuffer::new(4, 4);
        assert!(buf.set(3, 3, Cell::new('x')));
        assert!(!buf.set(4, 0, Cell::new('x')));
    }

    #[test]
    fn paint_text_places_characters() {
        let mut buf = FrameBuffer::new(20, 2);
        let style = Style::fg(CellColor::Yellow).bold();
        let cols = buf.paint_text(2, 1, "0001 ", style);
        assert_eq!(cols, 5);
        assert_eq!(buf.row_text(1), "  0001");
        let cell = buf.get(2, 1).unwrap();
        assert_eq!(cell.fg, CellColor::Yellow);
        assert!(cell.attrs.contains(Attr::BOLD));
    }

    #[test]
    fn paint_text_clips_at_right_edge() {
        let mut buf = FrameBuffer::new(5, 1);
        let cols = buf.paint_text(3, 0, "hello", Style::PLAIN);
        assert_eq!(cols, 2);
        assert_eq!(buf.row_text(0), "   he");
    }

    #[test]
    fn paint_text_below_bottom_is_noop() {
        let mut buf = FrameBuffer::new(5, 1);
        assert_eq!(buf.paint_text(0, 1, "x", Style::PLAIN), 0);
    }

    #[test]
    fn wide_char_gets_continuation() {
        let mut buf = FrameBuffer::new(6, 1);
        assert_eq!(buf.paint_text(0, 0, "中a", Style::PLAIN), 3);
        assert!(buf.get(1, 0).unwrap().is_continuation());
        assert_eq!(buf.row_text(0), "中a");
    }

    #[test]
    fn wide_char_at_edge_becomes_space() {
        let mut buf = FrameBuffer::new(3, 1);
        buf.paint_text(0, 0, "ab中", Style::PLAIN);
        assert_eq!(buf.get(2, 0).unwrap().character(), Some(' '));
    }

    #[test]
    fn overwriting_continuation_breaks_owner() {
        let mut buf = FrameBuffer::new(4, 1);
        buf.paint_text(0, 0, "中", Style::PLAIN);
        buf.paint_cell(1, 0, 'x', Style::PLAIN);
        assert_eq!(buf.row_text(0), " x");
    }

    #[test]
    fn fill_paints_background() {
        let mut buf = FrameBuffer::new(8, 1);
        let style = Style::PLAIN.on(CellColor::Blue);
        buf.fill(2, 0, 100, style);
        assert_eq!(buf.get(1, 0).unwrap().bg, CellColor::Default);
        assert_eq!(buf.get(7, 0).unwrap().bg, CellColor::Blue);
    }

    #[test]
    fn resize_clears() {
        let mut buf = FrameBuffer::new(4, 4);
        buf.paint_text(0, 0, "abc", Style::PLAIN);
        buf.resize(2, 2);
        assert_eq!(buf.width(), 2);
        assert_eq!(buf.row_text(0), "");
    }

    #[test]
    fn widths() {
        assert_eq!(string_width("~~~~"), 4);
        assert_eq!(string_width("中文"), 4);
        assert_eq!(char_width('\t'), 0);
    }
}
