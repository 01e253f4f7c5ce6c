// SPDX-License-Identifier: MIT
//
// Cell colors — the eight classic ANSI colors.
//
// led paints with the standard terminal palette and nothing else, so the
// user's terminal theme decides what "yellow" or "blue" actually looks
// like. Bright shades come from the bold attribute, as on the consoles led
// was first written for.

use std::fmt;

// ─── CellColor ───────────────────────────────────────────────────────────────

/// Foreground or background color of a cell.
///
/// Stored in the [`FrameBuffer`](crate::buffer::FrameBuffer) and turned into
/// an SGR parameter by [`ansi::Sgr`](crate::ansi::Sgr). One byte, cheap to
/// compare, which is what the diff renderer wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// Whatever the terminal uses when no color is set.
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl CellColor {
    /// Palette slot 0–7, or `None` for the terminal default.
    #[must_use]
    pub const fn index(self) -> Option<u8> {
        match self {
            Self::Default => None,
            Self::Black => Some(0),
            Self::Red => Some(1),
            Self::Green => Some(2),
            Self::Yellow => Some(3),
            Self::Blue => Some(4),
            Self::Magenta => Some(5),
            Self::Cyan => Some(6),
            Self::White => Some(7),
        }
    }

    /// Whether this is the terminal default color.
    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        };
        f.write_str(name)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_default() {
        assert!(CellColor::default().is_default());
        assert!(!CellColor::Blue.is_default());
    }

    #[test]
    fn palette_slots_follow_ansi_order() {
        assert_eq!(CellColor::Default.index(), None);
        assert_eq!(CellColor::Black.index(), Some(0));
        assert_eq!(CellColor::Yellow.index(), Some(3));
        assert_eq!(CellColor::White.index(), Some(7));
    }

    #[test]
    fn display_names() {
        assert_eq!(CellColor::Red.to_string(), "red");
        assert_eq!(CellColor::Default.to_string(), "default");
    }
}
