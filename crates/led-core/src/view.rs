//! View — the bridge from document to framebuffer.
//!
//! Every screen the editor shows is painted here by a stateless function
//! that takes the document (or a piece of it) and a led-term
//! [`FrameBuffer`]. The shell decides which screen is up; this module only
//! knows where things go and how they look.
//!
//! # Layouts
//!
//! ```text
//! main screen              insert screen            pager
//! ┌──────────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │0003 line above   │    │     0000000000111│    │view 0001/0045    │
//! │0004 line above   │    │     0123456789012│    │0001 first        │
//! │0005 current line │    │0005 current line │    │0002 second       │
//! │0006 line below   │    │        ^         │    │...               │
//! │~~~~              │    │                  │    │press any key ... │
//! │ status           │    │:prompt           │    └──────────────────┘
//! │:prompt / confirm │    └──────────────────┘
//! └──────────────────┘
//! ```
//!
//! Painters clip at the frame edges; a small terminal shows less, it never
//! panics.

use led_term::buffer::FrameBuffer;
use led_term::cell::Style;
use led_term::color::CellColor;

use crate::document::Document;
use crate::limits::{MAX_INSERTABLE_WIDTH, WINDOW_RADIUS};
use crate::pager::Pager;
use crate::prompt::PromptLine;
use crate::status::{Status, StatusKind};

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

pub const LOGO: Style = Style::fg(CellColor::Yellow);
pub const BLANK_LINE: Style = Style::fg(CellColor::Blue);
pub const LINE: Style = Style::PLAIN;
pub const LINENO: Style = Style::fg(CellColor::Yellow);
pub const CURRENT_LINE: Style = Style::fg(CellColor::White).on(CellColor::Blue).bold();
pub const CURRENT_LINENO: Style = Style::fg(CellColor::Yellow).on(CellColor::Black).bold();
pub const STATUS_INFO: Style = Style::fg(CellColor::White).on(CellColor::Black).bold();
pub const STATUS_ERROR: Style = Style::fg(CellColor::Red).bold();
pub const CONFIRM: Style = Style::fg(CellColor::Red).bold();
pub const RULER: Style = Style::fg(CellColor::Green).bold();

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Rows taken by the editing window.
#[allow(clippy::cast_possible_truncation)]
pub const WINDOW_ROWS: u16 = 2 * WINDOW_RADIUS as u16 + 1;

/// Main screen: status line, right under the window.
pub const STATUS_ROW: u16 = WINDOW_ROWS;

/// Main screen: prompt or confirmation question.
pub const PROMPT_ROW: u16 = STATUS_ROW + 1;

/// Insert screen: the two ruler rows start here.
pub const RULER_ROW: u16 = 0;

/// Insert screen: the line being edited.
pub const INSERT_LINE_ROW: u16 = RULER_ROW + 2;

/// Insert screen: the caret under the chosen offset.
pub const CARET_ROW: u16 = INSERT_LINE_ROW + 1;

/// Insert screen: the prompt.
pub const INSERT_PROMPT_ROW: u16 = CARET_ROW + 2;

/// Width of the `NNNN ` line number column.
const LINENO_WIDTH: u16 = 5;

/// The question asked before anything that drops the document.
pub const CONFIRM_QUESTION: &str = "any unsaved data will be lost, sure? (y/n) ";

const LOGO_LINES: [&str; 5] = [
    "",
    "           .   .--   .",
    "           |   |-- .-|  a lightweight line editor",
    "           '-- '-- '-'",
    "",
];

const SPLASH_HINT: &str = "                press any key to start...";
const PAGER_HINT: &str = "press any key to continue...";

const HELP_BODY: [(&str, Style); 15] = [
    ("                         H E L P", STATUS_INFO),
    ("   c create   a append    n next line    f find forward", LINENO),
    ("   l load     i insert    N next line*   F find backward", LINENO),
    ("   s save     d delete    p prev line    v view all", LINENO),
    ("   q quit     D delete*   P prev line*   V view all*", LINENO),
    ("   h head     t tail      > go to line   ? help (this)", LINENO),
    ("   <backspace> remove last character of current line.", LINENO),
    ("   <return>    new line next to current line.", LINENO),
    ("   <space>     find next.", LINENO),
    ("         note: '*' means it will ask you a count.", STATUS_ERROR),
    ("", LINE),
    ("                 C O N T R I B U T E R S", STATUS_INFO),
    ("             eXerigumo Clanjor <cjxgm@126.com>", LINENO),
    ("", LINE),
    ("                press any key to go back...", LINE),
];

fn to_col(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

// ---------------------------------------------------------------------------
// Lines
// ---------------------------------------------------------------------------

/// Paint document line `index` at row `y`: a `NNNN ` number, then the
/// content padded to [`MAX_INSERTABLE_WIDTH`]. Slots outside the document
/// show `~~~~`.
pub fn paint_line(frame: &mut FrameBuffer, y: u16, doc: &Document, index: Option<usize>, current: bool) {
    let Some(line) = index.and_then(|i| doc.line(i)) else {
        frame.paint_text(0, y, "~~~~", BLANK_LINE);
        return;
    };
    let (number_style, text_style) = if current {
        (CURRENT_LINENO, CURRENT_LINE)
    } else {
        (LINENO, LINE)
    };

    let number = format!("{:04} ", index.map_or(0, |i| i + 1));
    frame.paint_text(0, y, &number, number_style);

    let used = frame.paint_text(LINENO_WIDTH, y, &line.display(), text_style);
    let pad = to_col(MAX_INSERTABLE_WIDTH).saturating_sub(used);
    frame.fill(LINENO_WIDTH.saturating_add(used), y, pad, text_style);
}

/// Paint the editing window: the cursor line with [`WINDOW_RADIUS`] lines
/// of context on either side, starting at `top`.
pub fn paint_window(frame: &mut FrameBuffer, top: u16, doc: &Document) {
    let cursor = doc.cursor();
    for row in 0..WINDOW_ROWS {
        let offset = usize::from(row);
        let index = (cursor + offset).checked_sub(WINDOW_RADIUS);
        paint_line(frame, top + row, doc, index, index == Some(cursor));
    }
}

// ---------------------------------------------------------------------------
// Status, prompt, confirmation
// ---------------------------------------------------------------------------

pub fn paint_status(frame: &mut FrameBuffer, y: u16, status: &Status) {
    let style = match status.kind {
        StatusKind::Info => STATUS_INFO,
        StatusKind::Error => STATUS_ERROR,
    };
    frame.paint_text(0, y, &format!(" {}", status.message), style);
}

/// Paint the prompt sigil and input at row `y`. Returns the screen
/// position of the input cursor.
pub fn paint_prompt(frame: &mut FrameBuffer, y: u16, prompt: &PromptLine) -> (u16, u16) {
    let mut sigil = [0u8; 4];
    let x = frame.paint_text(0, y, prompt.kind().sigil().encode_utf8(&mut sigil), LINE);
    frame.paint_text(x, y, prompt.input(), LINE);
    (x.saturating_add(to_col(prompt.cursor_column())), y)
}

/// Paint the confirmation question at row `y`. Returns the position right
/// after it, where the answer would be typed.
pub fn paint_confirm(frame: &mut FrameBuffer, y: u16) -> (u16, u16) {
    let x = frame.paint_text(0, y, CONFIRM_QUESTION, CONFIRM);
    (x, y)
}

/// The main screen: window, then the status line.
pub fn paint_main(frame: &mut FrameBuffer, doc: &Document, status: &Status) {
    paint_window(frame, 0, doc);
    paint_status(frame, STATUS_ROW, status);
}

// ---------------------------------------------------------------------------
// Insert screen
// ---------------------------------------------------------------------------

/// Two ruler rows over `length` columns: tens digits, then units digits.
pub fn paint_ruler(frame: &mut FrameBuffer, y: u16, length: usize) {
    let tens: String = (0..length).map(|i| digit((i / 10) % 10)).collect();
    let units: String = (0..length).map(|i| digit(i % 10)).collect();
    frame.paint_text(LINENO_WIDTH, y, &tens, RULER);
    frame.paint_text(LINENO_WIDTH, y + 1, &units, RULER);
}

fn digit(n: usize) -> char {
    char::from_digit(u32::try_from(n % 10).unwrap_or(0), 10).unwrap_or('0')
}

/// A `^` under column `offset` of the line content.
pub fn paint_caret(frame: &mut FrameBuffer, y: u16, offset: usize) {
    let x = LINENO_WIDTH.saturating_add(to_col(offset));
    frame.paint_cell(x, y, '^', RULER);
}

/// The insert screen: ruler, current line and, once the offset is known,
/// the caret under it.
pub fn paint_insert(frame: &mut FrameBuffer, doc: &Document, caret: Option<usize>) {
    paint_ruler(frame, RULER_ROW, doc.current().len());
    paint_line(frame, INSERT_LINE_ROW, doc, Some(doc.cursor()), true);
    if let Some(offset) = caret {
        paint_caret(frame, CARET_ROW, offset);
    }
}

// ---------------------------------------------------------------------------
// Full-screen pages
// ---------------------------------------------------------------------------

fn paint_logo(frame: &mut FrameBuffer) -> u16 {
    let mut y = 0;
    for text in LOGO_LINES {
        frame.paint_text(0, y, text, LOGO);
        y += 1;
    }
    y
}

/// The launch screen: logo and a hint to press a key.
pub fn paint_splash(frame: &mut FrameBuffer) {
    let y = paint_logo(frame);
    frame.paint_text(0, y, SPLASH_HINT, LINE);
}

/// The help screen: logo, key summary and credits.
pub fn paint_help(frame: &mut FrameBuffer) {
    let mut y = paint_logo(frame);
    for (text, style) in HELP_BODY {
        frame.paint_text(0, y, text, style);
        y += 1;
    }
}

/// One pager page: header, the page's lines without highlighting, hint.
pub fn paint_pager(frame: &mut FrameBuffer, doc: &Document, pager: &Pager) {
    frame.paint_text(0, 0, &pager.header(), STATUS_INFO);
    let mut y = 1;
    for index in pager.page() {
        if y >= frame.height() {
            break;
        }
        paint_line(frame, y, doc, Some(index), false);
        y += 1;
    }
    frame.paint_text(0, y, PAGER_HINT, STATUS_INFO);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
