// SPDX-License-Identifier: MIT
//
// Differential renderer.
//
// Each frame the editor repaints the whole screen into a FrameBuffer. The
// renderer compares it against the previous frame and emits escape
// sequences only for cells that changed. Moving the cursor one line in led
// changes a handful of rows out of 24, so most of the screen is skipped.
//
// The pipeline per frame:
//
//   1. The app paints into a FrameBuffer.
//   2. DiffRenderer::render() compares it with the stored previous frame.
//   3. Changed cells go to FrameOutput, which skips redundant escapes.
//   4. flush() writes the frame's text in one go.
//
// Unchanged rows are detected with a single slice comparison. The frame is
// wrapped in synchronized output (DEC 2026) so terminals that support it
// never show a half-drawn screen.

use std::io::{self, Write};

use crate::ansi::Control;
use crate::buffer::FrameBuffer;
use crate::output::FrameOutput;

// ─── RenderStats ─────────────────────────────────────────────────────────────

/// What a render pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Cells that differed from the previous frame and were rendered.
    pub cells_rendered: usize,
    /// Cells that matched the previous frame and were skipped.
    pub cells_skipped: usize,
    /// Total bytes of ANSI output generated.
    pub bytes_written: usize,
}

// ─── DiffRenderer ────────────────────────────────────────────────────────────

/// Differential renderer that emits ANSI only for changed cells.
///
/// ```no_run
/// use led_term::buffer::FrameBuffer;
/// use led_term::diff::DiffRenderer;
///
/// let mut renderer = DiffRenderer::new();
/// let frame = FrameBuffer::new(80, 24);
/// renderer.render(&frame);
/// renderer.flush().unwrap();
/// ```
pub struct DiffRenderer {
    output: FrameOutput,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    /// Create a renderer with no previous frame. The first render draws
    /// everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: FrameOutput::new(),
            previous: None,
        }
    }

    /// Diff `current` against the previous frame and generate ANSI output.
    ///
    /// Follow with [`flush`](Self::flush) or [`flush_to`](Self::flush_to).
    pub fn render(&mut self, current: &FrameBuffer) -> RenderStats {
        self.output.clear();

        let width = current.width();
        let height = current.height();
        let mut stats = RenderStats::default();

        if width == 0 || height == 0 {
            self.previous = Some(current.clone());
            return stats;
        }

        self.output.control(Control::BeginFrame);

        let previous = self
            .previous
            .take()
            .filter(|prev| prev.width() == width && prev.height() == height);

        if previous.is_none() {
            self.output.control(Control::ClearScreen);
        }

        for y in 0..height {
            let curr_row = current.row(y).unwrap_or_default();
            let prev_row = previous.as_ref().and_then(|p| p.row(y));

            if prev_row == Some(curr_row) {
                stats.cells_skipped += curr_row.len();
                continue;
            }

            for (x, cell) in (0..width).zip(curr_row) {
                let unchanged = prev_row.and_then(|row| row.get(usize::from(x))) == Some(cell);
                if unchanged {
                    stats.cells_skipped += 1;
                } else {
                    self.output.put(x, y, *cell);
                    stats.cells_rendered += 1;
                }
            }
        }

        // Leave the terminal in default colors between frames.
        self.output.control(Control::ResetStyle);
        self.output.control(Control::EndFrame);

        stats.bytes_written = self.output.len();

        match previous {
            Some(mut prev) => {
                prev.clone_from(current);
                self.previous = Some(prev);
            }
            None => self.previous = Some(current.clone()),
        }

        stats
    }

    /// The escape sequences and glyphs from the last render.
    #[must_use]
    pub fn output(&self) -> &str {
        self.output.as_str()
    }

    /// Write accumulated output to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.output.write_to(&mut io::stdout().lock())
    }

    /// Write accumulated output to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.output.write_to(w)
    }

    /// Discard the previous frame so the next render draws everything.
    pub fn force_redraw(&mut self) {
        self.previous = None;
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, Style};
    use crate::color::CellColor;

    fn render_frame(renderer: &mut DiffRenderer, frame: &FrameBuffer) -> (RenderStats, String) {
        let stats = renderer.render(frame);
        (stats, renderer.output().to_owned())
    }

    #[test]
    fn first_render_draws_everything() {
        let mut renderer = DiffRenderer::new();
        let frame = FrameBuffer::new(4, 2);
        let (stats, out) = render_frame(&mut renderer, &frame);
        assert_eq!(stats.cells_rendered, 8);
        assert_eq!(stats.cells_skipped, 0);
        assert!(out.starts_with("\x1b[?2026h\x1b[2J"));
        assert!(out.ends_with("\x1b[0m\x1b[?2026l"));
    }

    #[test]
    fn identical_frame_renders_nothing() {
        let mut renderer = DiffRenderer::new();
        let frame = FrameBuffer::new(4, 2);
        renderer.render(&frame);
        let (stats, out) = render_frame(&mut renderer, &frame);
        assert_eq!(stats.cells_rendered, 0);
        assert_eq!(stats.cells_skipped, 8);
        assert!(!out.contains("\x1b[2J"));
    }

    #[test]
    fn single_change_renders_one_cell() {
        let mut renderer = DiffRenderer::new();
        let mut frame = FrameBuffer::new(10, 3);
        renderer.render(&frame);

        frame.set(4, 1, Cell::styled('~', Style::fg(CellColor::Blue)));
        let (stats, out) = render_frame(&mut renderer, &frame);
        assert_eq!(stats.cells_rendered, 1);
        assert_eq!(stats.cells_skipped, 29);
        assert!(out.contains("\x1b[2;5H"));
        assert!(out.contains("\x1b[0;34m"));
        assert!(out.contains('~'));
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut renderer = DiffRenderer::new();
        renderer.render(&FrameBuffer::new(4, 2));
        let (stats, out) = render_frame(&mut renderer, &FrameBuffer::new(5, 2));
        assert_eq!(stats.cells_rendered, 10);
        assert!(out.contains("\x1b[2J"));
    }

    #[test]
    fn force_redraw_discards_previous() {
        let mut renderer = DiffRenderer::new();
        let frame = FrameBuffer::new(3, 1);
        renderer.render(&frame);
        renderer.force_redraw();
        let (stats, _) = render_frame(&mut renderer, &frame);
        assert_eq!(stats.cells_rendered, 3);
    }

    #[test]
    fn zero_size_frame_emits_nothing() {
        let mut renderer = DiffRenderer::new();
        let (stats, out) = render_frame(&mut renderer, &FrameBuffer::new(0, 0));
        assert_eq!(stats, RenderStats::default());
        assert!(out.is_empty());
    }

    #[test]
    fn flush_to_writes_and_clears() {
        let mut renderer = DiffRenderer::new();
        renderer.render(&FrameBuffer::new(2, 1));
        let mut sink = Vec::new();
        renderer.flush_to(&mut sink).unwrap();
        assert!(!sink.is_empty());
        assert!(renderer.output().is_empty());
    }
}
