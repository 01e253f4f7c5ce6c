// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop — wires the terminal pieces together.
//
// Stdin bytes flow in from the background reader, get parsed into key
// events, the application handles them and paints a frame, and the diff
// renderer writes only what changed. Nothing is drawn while nothing happens.
//
// The loop blocks on the stdin channel with a short timeout. A keypress
// wakes it immediately. When the timeout fires with a lone ESC still
// pending in the parser, that ESC is delivered as the Escape key; the
// timeout is the escape-sequence grace period.
//
// Terminal resize arrives as SIGWINCH. The handler sets an `AtomicBool`
// that the loop checks every iteration, so a resize is repainted within
// one timeout.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::ansi::Control;
use crate::buffer::FrameBuffer;
use crate::diff::DiffRenderer;
use crate::input::{Event, Parser};
use crate::reader::StdinReader;
use crate::terminal::{Size, Terminal};

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {}

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application tells the event loop to do after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Application interface for the event loop.
///
/// Per frame the loop calls [`on_event`](App::on_event) for each key,
/// [`on_resize`](App::on_resize) when the terminal changed size, then
/// [`paint`](App::paint) and [`cursor`](App::cursor) if anything happened.
pub trait App {
    /// Handle a parsed input event. Return [`Action::Quit`] to exit.
    fn on_event(&mut self, _event: &Event) -> Action {
        Action::Continue
    }

    /// The frame buffer has already been resized when this is called.
    fn on_resize(&mut self, _size: Size) {}

    /// Paint the current state. The buffer is cleared beforehand.
    fn paint(&mut self, buf: &mut FrameBuffer);

    /// Where to show the hardware cursor after painting, or `None` to hide it.
    fn cursor(&self) -> Option<(u16, u16)> {
        None
    }
}

// ─── Loop Config ─────────────────────────────────────────────────────────────

/// Event loop timing.
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// How long a lone ESC waits for the rest of a sequence (milliseconds).
    pub escape_timeout_ms: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            escape_timeout_ms: 25,
        }
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The terminal event loop.
///
/// ```no_run
/// use led_term::buffer::FrameBuffer;
/// use led_term::event_loop::{Action, App, EventLoop};
/// use led_term::input::{Event, KeyCode, KeyEvent};
///
/// struct Quitter;
///
/// impl App for Quitter {
///     fn on_event(&mut self, event: &Event) -> Action {
///         if let Event::Key(KeyEvent { code: KeyCode::Char('q'), .. }) = event {
///             return Action::Quit;
///         }
///         Action::Continue
///     }
///
///     fn paint(&mut self, _buf: &mut FrameBuffer) {}
/// }
///
/// EventLoop::new().run(&mut Quitter)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    renderer: DiffRenderer,
    config: LoopConfig,
}

impl EventLoop {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoopConfig::default())
    }

    #[must_use]
    pub fn with_config(config: LoopConfig) -> Self {
        Self {
            terminal: Terminal::new(),
            parser: Parser::new(),
            renderer: DiffRenderer::new(),
            config,
        }
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    /// Run until the application returns [`Action::Quit`] or stdin closes.
    ///
    /// The terminal is restored on exit, including when the loop errors.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup, teardown, or rendering fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let result = match StdinReader::spawn() {
            Ok((mut reader, rx)) => {
                let result = self.run_inner(app, &rx);
                reader.stop();
                result
            }
            Err(err) => Err(err),
        };

        self.terminal.leave()?;
        result
    }

    fn run_inner(&mut self, app: &mut impl App, rx: &Receiver<Vec<u8>>) -> io::Result<()> {
        let size = self.terminal.size();
        let mut frame = FrameBuffer::new(size.cols, size.rows);
        app.on_resize(size);
        let mut dirty = true;
        let timeout = Duration::from_millis(self.config.escape_timeout_ms);

        loop {
            let events = match rx.recv_timeout(timeout) {
                Ok(bytes) => self.parser.advance(&bytes),
                Err(RecvTimeoutError::Timeout) if self.parser.has_pending() => {
                    self.parser.flush()
                }
                Err(RecvTimeoutError::Timeout) => Vec::new(),
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            };

            if dispatch(app, &events) == Action::Quit {
                return Ok(());
            }
            dirty |= !events.is_empty();

            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let new_size = self.terminal.refresh_size();
                frame.resize(new_size.cols, new_size.rows);
                self.renderer.force_redraw();
                app.on_resize(new_size);
                dirty = true;
            }

            if dirty {
                frame.clear();
                app.paint(&mut frame);
                self.renderer.render(&frame);
                self.renderer.flush()?;

                let mut stdout = io::stdout().lock();
                match app.cursor() {
                    Some((x, y)) => {
                        write!(stdout, "{}{}", Control::MoveTo(x, y), Control::ShowCursor)?;
                    }
                    None => write!(stdout, "{}", Control::HideCursor)?,
                }
                stdout.flush()?;

                dirty = false;
            }
        }
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Feed events to the app in order, stopping at the first Quit.
fn dispatch(app: &mut impl App, events: &[Event]) -> Action {
    for event in events {
        if app.on_event(event) == Action::Quit {
            return Action::Quit;
        }
    }
    Action::Continue
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, KeyEvent};

    #[derive(Default)]
    struct Recorder {
        seen: Vec<KeyCode>,
    }

    impl App for Recorder {
        fn on_event(&mut self, event: &Event) -> Action {
            let Event::Key(key) = event;
            self.seen.push(key.code);
            if key.code == KeyCode::Char('q') {
                Action::Quit
            } else {
                Action::Continue
            }
        }

        fn paint(&mut self, _buf: &mut FrameBuffer) {}
    }

    fn key(ch: char) -> Event {
        Event::Key(KeyEvent::plain(KeyCode::Char(ch)))
    }

    #[test]
    fn default_escape_timeout() {
        assert_eq!(LoopConfig::default().escape_timeout_ms, 25);
    }

    #[test]
    fn dispatch_stops_at_quit() {
        let mut app = Recorder::default();
        let action = dispatch(&mut app, &[key('a'), key('q'), key('b')]);
        assert_eq!(action, Action::Quit);
        assert_eq!(app.seen, vec![KeyCode::Char('a'), KeyCode::Char('q')]);
    }

    #[test]
    fn dispatch_empty_continues() {
        let mut app = Recorder::default();
        assert_eq!(dispatch(&mut app, &[]), Action::Continue);
        assert!(app.seen.is_empty());
    }

    #[test]
    fn app_defaults() {
        struct Minimal;
        impl App for Minimal {
            fn paint(&mut self, _buf: &mut FrameBuffer) {}
        }
        let mut app = Minimal;
        assert_eq!(app.on_event(&key('x')), Action::Continue);
        app.on_resize(Size { cols: 100, rows: 50 });
        assert!(app.cursor().is_none());
    }

    #[test]
    fn event_loop_reports_size() {
        let event_loop = EventLoop::new();
        assert!(event_loop.size().cols > 0);
        assert!(event_loop.size().rows > 0);
    }

    #[test]
    fn sigwinch_flag_swap() {
        SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
        assert!(SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed));
        assert!(!SIGWINCH_RECEIVED.load(Ordering::Relaxed));
    }
}
