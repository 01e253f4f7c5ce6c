// SPDX-License-Identifier: MIT
//
// The escape sequences led sends.
//
// Only a handful: place the cursor, show or hide it, clear, pick a style,
// bracket a frame with synchronized output, and switch to and from the
// alternate screen. Each is a `Display` value, so it can be formatted into
// the frame's text buffer or written straight to the terminal.
//
// Positions are 0-based here and 1-based on the wire.

use std::fmt::{self, Write as _};

use crate::cell::{Attr, Style};

// ─── Control ─────────────────────────────────────────────────────────────────

/// A terminal command without parameters beyond a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// CUP: put the cursor at column `x`, row `y`.
    MoveTo(u16, u16),
    /// DECTCEM set.
    ShowCursor,
    /// DECTCEM reset.
    HideCursor,
    /// ED 2: blank the whole screen.
    ClearScreen,
    /// SGR 0: default colors, no attributes.
    ResetStyle,
    /// DEC mode 2026 on: hold output until the frame is complete.
    BeginFrame,
    /// DEC mode 2026 off.
    EndFrame,
    /// DEC mode 1049 on: the alternate screen, so the shell's scrollback
    /// survives the session.
    EnterFullScreen,
    /// DEC mode 1049 off.
    LeaveFullScreen,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MoveTo(x, y) => {
                write!(f, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
            }
            Self::ShowCursor => f.write_str("\x1b[?25h"),
            Self::HideCursor => f.write_str("\x1b[?25l"),
            Self::ClearScreen => f.write_str("\x1b[2J"),
            Self::ResetStyle => f.write_str("\x1b[0m"),
            Self::BeginFrame => f.write_str("\x1b[?2026h"),
            Self::EndFrame => f.write_str("\x1b[?2026l"),
            Self::EnterFullScreen => f.write_str("\x1b[?1049h"),
            Self::LeaveFullScreen => f.write_str("\x1b[?1049l"),
        }
    }
}

/// What entering full-screen mode sends.
pub const ENTER: [Control; 3] = [
    Control::EnterFullScreen,
    Control::HideCursor,
    Control::ClearScreen,
];

/// What leaving sends, on a normal exit and from the panic hook alike.
/// The alternate screen goes last so the shell comes back clean.
pub const RESTORE: [Control; 4] = [
    Control::EndFrame,
    Control::ResetStyle,
    Control::ShowCursor,
    Control::LeaveFullScreen,
];

/// Concatenate `controls` into one string.
#[must_use]
pub fn sequence(controls: &[Control]) -> String {
    let mut out = String::new();
    for control in controls {
        // Formatting into a String cannot fail.
        let _ = write!(out, "{control}");
    }
    out
}

// ─── Sgr ─────────────────────────────────────────────────────────────────────

const ATTR_CODES: [(Attr, u8); 4] = [
    (Attr::BOLD, 1),
    (Attr::DIM, 2),
    (Attr::UNDERLINE, 4),
    (Attr::INVERSE, 7),
];

/// One SGR sequence that selects a whole [`Style`] from scratch.
///
/// It always starts with `0`, so nothing from the previous style leaks
/// through and default colors need no parameter of their own:
/// `Sgr(Style::PLAIN)` is `ESC[0m`, bold yellow on blue is `ESC[0;1;33;44m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sgr(pub Style);

impl fmt::Display for Sgr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Style { fg, bg, attrs } = self.0;
        f.write_str("\x1b[0")?;
        for (flag, code) in ATTR_CODES {
            if attrs.contains(flag) {
                write!(f, ";{code}")?;
            }
        }
        if let Some(index) = fg.index() {
            write!(f, ";{}", 30 + index)?;
        }
        if let Some(index) = bg.index() {
            write!(f, ";{}", 40 + index)?;
        }
        f.write_str("m")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
