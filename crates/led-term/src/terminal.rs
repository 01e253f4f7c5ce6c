// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode, full-screen mode, and putting both back.
//
// led owns the terminal from `enter` to `leave`: stdin in raw mode so every
// key arrives as typed (Ctrl-C included), the alternate screen so the
// shell's scrollback is untouched, and the cursor hidden until a prompt
// wants it. `leave`, `Drop`, and a panic hook all send the same restore
// sequence, so the shell comes back usable however the editor exits.
//
// Safety: tcgetattr, cfmakeraw, tcsetattr, ioctl(TIOCGWINSZ), isatty and a
// raw write(2) from the panic hook are the only unsafe calls.
#![allow(unsafe_code)]

use std::io::{self, Write};
#[cfg(unix)]
use std::sync::Mutex;
use std::sync::Once;

use crate::ansi;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Columns across.
    pub cols: u16,
    /// Rows down.
    pub rows: u16,
}

impl Size {
    /// Assumed when stdout is not a terminal (tests, pipes).
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };
}

/// Ask the kernel how big the terminal on stdout is. `None` when stdout is
/// not a terminal or reports a zero size.
#[cfg(unix)]
#[must_use]
pub fn query_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    if unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) } != 0 {
        return None;
    }
    (ws.ws_col > 0 && ws.ws_row > 0).then_some(Size {
        cols: ws.ws_col,
        rows: ws.ws_row,
    })
}

#[cfg(not(unix))]
#[must_use]
pub fn query_size() -> Option<Size> {
    None
}

/// Whether stdin is a terminal. Raw mode is only attempted when it is.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Raw Mode ───────────────────────────────────────────────────────────────

/// The stdin settings from before raw mode, for the panic hook.
#[cfg(unix)]
static SAVED_TERMIOS: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Stdin in raw mode. Holds the settings to go back to.
#[cfg(unix)]
struct RawMode {
    /// Settings from before [`enable`](Self::enable).
    saved: libc::termios,
}

#[cfg(unix)]
impl RawMode {
    /// Switch stdin to raw mode. `Ok(None)` when stdin is not a terminal.
    fn enable() -> io::Result<Option<Self>> {
        if !is_tty() {
            return Ok(None);
        }

        let mut saved: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &raw mut saved) } != 0 {
            return Err(io::Error::last_os_error());
        }

        // No echo, no line editing, no signals from Ctrl-C/Ctrl-Z, no CR/NL
        // translation, 8-bit bytes.
        let mut settings = saved;
        unsafe { libc::cfmakeraw(&raw mut settings) };
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const settings) } != 0
        {
            return Err(io::Error::last_os_error());
        }

        if let Ok(mut slot) = SAVED_TERMIOS.lock() {
            *slot = Some(saved);
        }
        Ok(Some(Self { saved }))
    }

    fn restore(&self) -> io::Result<()> {
        if let Ok(mut slot) = SAVED_TERMIOS.lock() {
            *slot = None;
        }
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const self.saved) } != 0
        {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

#[cfg(not(unix))]
struct RawMode;

#[cfg(not(unix))]
impl RawMode {
    #[allow(clippy::unnecessary_wraps)]
    const fn enable() -> io::Result<Option<Self>> {
        Ok(None)
    }

    #[allow(clippy::unnecessary_wraps)]
    const fn restore(&self) -> io::Result<()> {
        Ok(())
    }
}

// ─── Panic Hook ─────────────────────────────────────────────────────────────

static PANIC_HOOK: Once = Once::new();

/// Restore the screen and stdin before the panic message prints, so it
/// lands on the normal screen of a cooked terminal.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let restore = ansi::sequence(&ansi::RESTORE);
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            write_unlocked(restore.as_bytes());
            #[cfg(unix)]
            if let Some(saved) = SAVED_TERMIOS.lock().ok().and_then(|slot| *slot) {
                unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &raw const saved) };
            }
            previous(info);
        }));
    });
}

/// Write to fd 1 without taking the stdout lock, which the panicking
/// thread may hold.
#[cfg(unix)]
fn write_unlocked(bytes: &[u8]) {
    unsafe { libc::write(libc::STDOUT_FILENO, bytes.as_ptr().cast(), bytes.len()) };
}

#[cfg(not(unix))]
fn write_unlocked(bytes: &[u8]) {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(bytes);
    let _ = stdout.flush();
}

fn send(controls: &[ansi::Control]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(ansi::sequence(controls).as_bytes())?;
    stdout.flush()
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// The terminal led draws on.
///
/// ```no_run
/// use led_term::terminal::Terminal;
///
/// let mut term = Terminal::new();
/// term.enter()?;
/// // ... draw, read keys ...
/// term.leave()?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Terminal {
    /// Last known size; refreshed after SIGWINCH.
    size: Size,
    /// Present while stdin is in raw mode.
    raw: Option<RawMode>,
    /// Between `enter` and `leave`.
    active: bool,
}

impl Terminal {
    /// A handle sized to the current terminal, or [`Size::FALLBACK`].
    /// The terminal itself is left alone until [`enter`](Self::enter).
    #[must_use]
    pub fn new() -> Self {
        Self {
            size: query_size().unwrap_or(Size::FALLBACK),
            raw: None,
            active: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Query the size again; keeps the old one if the query fails.
    pub fn refresh_size(&mut self) -> Size {
        if let Some(size) = query_size() {
            self.size = size;
        }
        self.size
    }

    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Raw mode, alternate screen, hidden cursor, blank screen. Does
    /// nothing when already entered.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin's settings cannot be changed or stdout
    /// cannot be written.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        install_panic_hook();
        self.raw = RawMode::enable()?;
        self.active = true;
        send(&ansi::ENTER)
    }

    /// Back to the normal screen with the cursor visible and stdin cooked.
    /// Does nothing when not entered.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written or stdin's settings
    /// cannot be restored.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let sent = send(&ansi::RESTORE);
        if let Some(raw) = self.raw.take() {
            raw.restore()?;
        }
        sent
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
