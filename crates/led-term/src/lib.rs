// SPDX-License-Identifier: MIT
//
// led-term — terminal layer for led.
//
// Raw termios and ANSI escape sequences, no TUI framework underneath.
// The editor paints a grid of cells each frame; the diff renderer sends
// only the cells that changed, with a stateful writer that skips
// redundant escape codes. Input comes from a background stdin reader and
// a small parser that turns bytes into key events.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod diff;
pub mod event_loop;
pub mod input;
pub mod output;
pub mod reader;
pub mod terminal;
