// SPDX-License-Identifier: MIT
//
// led — a lightweight full-screen line editor.
//
// This is the main binary that wires together both crates:
//
//   led-term → terminal control, rendering, input parsing, event loop
//   led-core → document, edits, search, load/save, screen painters
//
// The Editor struct implements led-term's App trait, connecting the event
// loop to the editor's state. Each keypress flows through:
//
//   stdin → parser → on_event → screen dispatch → document mutation
//   paint → led-core view painters → framebuffer → diff renderer → terminal
//
// Every command is a single key. Commands that need an argument open a
// prompt under the status line; commands that drop the document ask for
// confirmation first.
//
//   ┌──────────────────────────────┐
//   │ window (cursor ± 2 lines)    │  ← 5 rows
//   ├──────────────────────────────┤
//   │ status                       │  ← cleared by the next command
//   ├──────────────────────────────┤
//   │ prompt / confirmation        │
//   └──────────────────────────────┘

mod cli;
mod logging;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing::{debug, info};

use led_core::limits::{DEFAULT_VIEW_PAGE, MAX_INSERT_OFFSET};
use led_core::pager::Pager;
use led_core::prompt::{PromptKind, PromptLine};
use led_core::search::Direction;
use led_core::view;
use led_core::{Document, EditError, Notice, Status};

use led_term::buffer::FrameBuffer;
use led_term::event_loop::{Action, App, EventLoop};
use led_term::input::{Event, KeyCode, KeyEvent, Modifiers};

use crate::cli::Cli;

// ─── Screens ────────────────────────────────────────────────────────────────

/// A command waiting for its prompt answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Append,
    Delete,
    Prev,
    Next,
    Save,
    Load,
    View,
    GotoLine,
    Find(Direction),
}

impl Pending {
    const fn prompt_kind(self) -> PromptKind {
        match self {
            Self::Append | Self::Save | Self::Load | Self::Find(_) => PromptKind::Text,
            Self::Delete | Self::Prev | Self::Next | Self::View | Self::GotoLine => {
                PromptKind::Integer
            }
        }
    }
}

/// What a `y` at the confirmation question does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Confirmed {
    Create,
    Quit,
}

/// What is on screen, and so where the next key goes.
#[derive(Debug)]
enum Screen {
    /// Logo; any key starts editing.
    Splash,
    /// The window and status line; keys are commands.
    Main,
    /// Main screen with a prompt under it.
    Prompt { prompt: PromptLine, pending: Pending },
    /// Main screen with the confirmation question under it.
    Confirm(Confirmed),
    /// Key summary; any key goes back.
    Help,
    /// "view all"; any key turns the page.
    Pager(Pager),
    /// Insert, first step: ruler over the current line, asking the offset.
    InsertOffset(PromptLine),
    /// Insert, second step: caret under the offset, asking the text.
    InsertText { offset: usize, prompt: PromptLine },
}

/// Outcome of one key on an open prompt.
enum PromptInput {
    Editing,
    Submitted,
}

/// Apply `key` to `prompt`. Enter submits; Escape and Ctrl+C submit an
/// empty answer.
fn edit_prompt(prompt: &mut PromptLine, key: &KeyEvent) -> PromptInput {
    let ctrl = key.modifiers.contains(Modifiers::CTRL);
    match key.code {
        KeyCode::Enter => return PromptInput::Submitted,
        KeyCode::Escape => {
            prompt.clear();
            return PromptInput::Submitted;
        }
        KeyCode::Char('c') if ctrl => {
            prompt.clear();
            return PromptInput::Submitted;
        }
        KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(Modifiers::ALT) => {
            prompt.insert_char(ch);
        }
        KeyCode::Tab => {
            prompt.insert_char('\t');
        }
        KeyCode::Backspace => {
            prompt.backspace();
        }
        KeyCode::Left => prompt.move_left(),
        KeyCode::Right => prompt.move_right(),
        KeyCode::Home => prompt.move_home(),
        KeyCode::End => prompt.move_end(),
        _ => {}
    }
    PromptInput::Editing
}

/// The prompt answer as a file path.
fn prompt_path(prompt: &PromptLine) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&prompt.text()).into_owned())
}

// ─── Editor ─────────────────────────────────────────────────────────────────

/// The editor application state.
struct Editor {
    doc: Document,
    screen: Screen,

    /// What the last command had to say. Cleared when the next command key
    /// arrives.
    status: Status,

    /// Screen position of the cursor from the last paint, used by the
    /// event loop to position the hardware terminal cursor.
    cursor_screen: Option<(u16, u16)>,
}

impl Editor {
    /// An editor showing the splash screen over a blank document.
    fn new() -> Self {
        Self {
            doc: Document::new(),
            screen: Screen::Splash,
            status: Status::none(),
            cursor_screen: None,
        }
    }

    /// Load `path` into the document, keeping the outcome for the first
    /// main screen.
    fn open(&mut self, path: &Path) {
        let result = self.doc.load(path);
        self.report_notice(result);
    }

    fn report(&mut self, result: Result<(), EditError>) {
        if let Err(err) = result {
            debug!(%err, "command rejected");
            self.status = Status::from(err);
        }
    }

    fn report_notice(&mut self, result: Result<Notice, EditError>) {
        self.status = match result {
            Ok(notice) => Status::from(notice),
            Err(err) => {
                debug!(%err, "command rejected");
                Status::from(err)
            }
        };
    }

    fn ask(&mut self, pending: Pending) {
        self.screen = Screen::Prompt {
            prompt: PromptLine::new(pending.prompt_kind()),
            pending,
        };
    }

    // ── Main screen ───────────────────────────────────────────────────

    fn handle_main(&mut self, key: &KeyEvent) -> Action {
        self.status = Status::none();

        if key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) {
            self.status = Status::from(EditError::UnknownCommand);
            return Action::Continue;
        }

        match key.code {
            KeyCode::Char(ch) => return self.command(ch),
            KeyCode::Enter => {
                let result = self.doc.new_line_after_cursor();
                self.report(result);
            }
            KeyCode::Backspace => self.doc.backspace(),
            KeyCode::Up => return self.command('p'),
            KeyCode::Down => return self.command('n'),
            KeyCode::Home => return self.command('h'),
            KeyCode::End => return self.command('t'),
            _ => self.status = Status::from(EditError::UnknownCommand),
        }
        Action::Continue
    }

    /// Run the single-key command `ch`.
    fn command(&mut self, ch: char) -> Action {
        debug!(command = %ch, "command");
        match ch {
            'c' => self.screen = Screen::Confirm(Confirmed::Create),
            'q' => self.screen = Screen::Confirm(Confirmed::Quit),
            'a' => self.ask(Pending::Append),
            'i' => self.begin_insert(),
            'd' => {
                let result = self.doc.delete_current(1);
                self.report(result);
            }
            'D' => self.ask(Pending::Delete),
            'p' => {
                let result = self.doc.prev(1);
                self.report(result);
            }
            'P' => self.ask(Pending::Prev),
            'n' => {
                let result = self.doc.next(1);
                self.report(result);
            }
            'N' => self.ask(Pending::Next),
            's' => self.ask(Pending::Save),
            'l' => self.ask(Pending::Load),
            'h' => self.doc.goto_head(),
            't' => self.doc.goto_tail(),
            'v' => self.view(DEFAULT_VIEW_PAGE),
            'V' => self.ask(Pending::View),
            '>' => self.ask(Pending::GotoLine),
            'f' => self.ask(Pending::Find(Direction::Forward)),
            'F' => self.ask(Pending::Find(Direction::Backward)),
            ' ' => {
                let result = self.doc.find_next();
                self.report(result);
            }
            '?' => self.screen = Screen::Help,
            _ => self.status = Status::from(EditError::UnknownCommand),
        }
        Action::Continue
    }

    /// Carry out `pending` with the answer in `prompt`.
    fn submit(&mut self, pending: Pending, prompt: &PromptLine) {
        debug!(?pending, answer = prompt.input(), "prompt answered");
        let result = match pending {
            Pending::Append => self.doc.append(&prompt.text()),
            Pending::Delete => self.doc.delete_current(prompt.integer()),
            Pending::Prev => self.doc.prev(prompt.integer()),
            Pending::Next => self.doc.next(prompt.integer()),
            Pending::GotoLine => self.doc.goto_line(prompt.integer()),
            Pending::Find(direction) => self.doc.start_search(&prompt.text(), direction),
            Pending::View => {
                self.view(prompt.integer());
                return;
            }
            Pending::Save => {
                let result = self.doc.save(&prompt_path(prompt));
                self.report_notice(result);
                return;
            }
            Pending::Load => {
                let result = self.doc.load(&prompt_path(prompt));
                self.report_notice(result);
                return;
            }
        };
        self.report(result);
    }

    fn view(&mut self, page_size: i64) {
        match Pager::new(page_size, self.doc.line_count()) {
            Ok(pager) => self.screen = Screen::Pager(pager),
            Err(err) => self.status = Status::from(err),
        }
    }

    // ── Insert ────────────────────────────────────────────────────────

    fn begin_insert(&mut self) {
        match self.doc.check_insertable() {
            Ok(()) => self.screen = Screen::InsertOffset(PromptLine::new(PromptKind::Integer)),
            Err(err) => self.status = Status::from(err),
        }
    }

    /// Accept the offset answer if it lands inside the current line.
    fn choose_insert_offset(&mut self, answer: i64) {
        let len = self.doc.current().len();
        let offset = usize::try_from(answer)
            .ok()
            .filter(|&o| o <= MAX_INSERT_OFFSET && o <= len);
        match offset {
            Some(offset) => {
                self.screen = Screen::InsertText {
                    offset,
                    prompt: PromptLine::new(PromptKind::Text),
                };
            }
            None => self.status = Status::from(EditError::NothingToDo),
        }
    }

    fn finish_insert(&mut self, offset: usize, prompt: &PromptLine) {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let result = self.doc.insert_at(offset, &prompt.text());
        self.report(result);
    }
}

// ─── App implementation ─────────────────────────────────────────────────────

impl App for Editor {
    fn on_event(&mut self, event: &Event) -> Action {
        let Event::Key(key) = event;

        // Every screen but the ones that keep their state falls back to Main.
        match std::mem::replace(&mut self.screen, Screen::Main) {
            Screen::Splash | Screen::Help => {}
            Screen::Main => return self.handle_main(key),
            Screen::Prompt {
                mut prompt,
                pending,
            } => match edit_prompt(&mut prompt, key) {
                PromptInput::Editing => self.screen = Screen::Prompt { prompt, pending },
                PromptInput::Submitted => self.submit(pending, &prompt),
            },
            Screen::Confirm(what) => {
                if key.code == KeyCode::Char('y') && key.modifiers.is_empty() {
                    match what {
                        Confirmed::Create => self.doc.reset(),
                        Confirmed::Quit => return Action::Quit,
                    }
                }
            }
            Screen::Pager(mut pager) => {
                if pager.advance() {
                    self.screen = Screen::Pager(pager);
                }
            }
            Screen::InsertOffset(mut prompt) => match edit_prompt(&mut prompt, key) {
                PromptInput::Editing => self.screen = Screen::InsertOffset(prompt),
                PromptInput::Submitted => self.choose_insert_offset(prompt.integer()),
            },
            Screen::InsertText { offset, mut prompt } => match edit_prompt(&mut prompt, key) {
                PromptInput::Editing => self.screen = Screen::InsertText { offset, prompt },
                PromptInput::Submitted => self.finish_insert(offset, &prompt),
            },
        }
        Action::Continue
    }

    fn paint(&mut self, frame: &mut FrameBuffer) {
        self.cursor_screen = match &self.screen {
            Screen::Splash => {
                view::paint_splash(frame);
                None
            }
            Screen::Main => {
                view::paint_main(frame, &self.doc, &self.status);
                None
            }
            Screen::Prompt { prompt, .. } => {
                view::paint_main(frame, &self.doc, &self.status);
                Some(view::paint_prompt(frame, view::PROMPT_ROW, prompt))
            }
            Screen::Confirm(_) => {
                view::paint_main(frame, &self.doc, &self.status);
                Some(view::paint_confirm(frame, view::PROMPT_ROW))
            }
            Screen::Help => {
                view::paint_help(frame);
                None
            }
            Screen::Pager(pager) => {
                view::paint_pager(frame, &self.doc, pager);
                None
            }
            Screen::InsertOffset(prompt) => {
                view::paint_insert(frame, &self.doc, None);
                Some(view::paint_prompt(frame, view::INSERT_PROMPT_ROW, prompt))
            }
            Screen::InsertText { offset, prompt } => {
                view::paint_insert(frame, &self.doc, Some(*offset));
                Some(view::paint_prompt(frame, view::INSERT_PROMPT_ROW, prompt))
            }
        };
    }

    fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor_screen
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn run(cli: &Cli) -> std::io::Result<()> {
    let _log_guard = cli
        .log_file
        .as_deref()
        .map(|path| logging::init(path, cli.log_level))
        .transpose()?;
    info!(version = env!("CARGO_PKG_VERSION"), file = ?cli.file, "led starting");

    let mut editor = Editor::new();
    if let Some(path) = &cli.file {
        editor.open(path);
    }

    let result = EventLoop::new().run(&mut editor);
    info!(ok = result.is_ok(), "led exiting");
    result
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("led: {err}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use led_core::StatusKind;
    use pretty_assertions::assert_eq;

    // ── Helpers ───────────────────────────────────────────────────────────

    fn press(ch: char) -> Event {
        Event::Key(KeyEvent::plain(KeyCode::Char(ch)))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::plain(code))
    }

    fn esc() -> Event {
        key(KeyCode::Escape)
    }

    fn enter() -> Event {
        key(KeyCode::Enter)
    }

    fn ctrl(ch: char) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(ch),
            modifiers: Modifiers::CTRL,
        })
    }

    /// Feed a sequence of events, returning the last action.
    fn feed(editor: &mut Editor, events: &[Event]) -> Action {
        let mut action = Action::Continue;
        for event in events {
            action = editor.on_event(event);
        }
        action
    }

    /// Type `text` into whatever prompt is open, then press Enter.
    fn answer(editor: &mut Editor, text: &str) {
        for ch in text.chars() {
            editor.on_event(&press(ch));
        }
        editor.on_event(&enter());
    }

    /// An editor past the splash screen with `lines` loaded.
    fn editor_with(lines: &[&str]) -> Editor {
        let mut e = Editor::new();
        e.doc = Document::from_lines(lines);
        e.screen = Screen::Main;
        e
    }

    fn contents(e: &Editor) -> Vec<String> {
        e.doc.lines().iter().map(|l| l.display().into_owned()).collect()
    }

    fn painted(e: &mut Editor) -> FrameBuffer {
        let mut frame = FrameBuffer::new(80, 24);
        e.paint(&mut frame);
        frame
    }

    // ── Splash & help ─────────────────────────────────────────────────────

    #[test]
    fn splash_then_main() {
        let mut e = Editor::new();
        assert!(painted(&mut e).row_text(5).contains("press any key to start"));
        feed(&mut e, &[press('q')]);
        assert!(matches!(e.screen, Screen::Main));
        assert_eq!(painted(&mut e).row_text(2), "0001");
    }

    #[test]
    fn help_and_back() {
        let mut e = editor_with(&["x"]);
        feed(&mut e, &[press('?')]);
        assert!(matches!(e.screen, Screen::Help));
        assert_eq!(painted(&mut e).row_text(5), "                         H E L P");
        feed(&mut e, &[press('z')]);
        assert!(matches!(e.screen, Screen::Main));
        assert_eq!(e.status, Status::none());
    }

    // ── Line editing ──────────────────────────────────────────────────────

    #[test]
    fn append_through_prompt() {
        let mut e = editor_with(&[""]);
        feed(&mut e, &[press('a')]);
        assert_eq!(painted(&mut e).row_text(view::PROMPT_ROW), ":");
        answer(&mut e, "hello\tworld");
        assert_eq!(contents(&e), ["hello world"]);
        assert!(matches!(e.screen, Screen::Main));
    }

    #[test]
    fn escape_cancels_prompt() {
        let mut e = editor_with(&["keep"]);
        feed(&mut e, &[press('a'), press('x'), esc()]);
        assert_eq!(contents(&e), ["keep"]);
        assert!(matches!(e.screen, Screen::Main));
    }

    #[test]
    fn ctrl_c_cancels_prompt() {
        let mut e = editor_with(&["keep"]);
        feed(&mut e, &[press('a'), press('x'), ctrl('c')]);
        assert_eq!(contents(&e), ["keep"]);
    }

    #[test]
    fn append_newline_insert_scenario() {
        let mut e = editor_with(&[""]);
        feed(&mut e, &[press('a')]);
        answer(&mut e, "hello");
        feed(&mut e, &[enter(), press('a')]);
        answer(&mut e, "world");
        feed(&mut e, &[press('p'), press('i')]);
        answer(&mut e, "2");
        answer(&mut e, "XY");

        assert_eq!(contents(&e), ["heXYllo", "world"]);
        assert_eq!(e.doc.cursor(), 0);
        assert_eq!(e.status, Status::none());
    }

    #[test]
    fn backspace_removes_last_char() {
        let mut e = editor_with(&["abc"]);
        feed(&mut e, &[key(KeyCode::Backspace)]);
        assert_eq!(contents(&e), ["ab"]);
    }

    // ── Insert ────────────────────────────────────────────────────────────

    #[test]
    fn insert_screens_show_ruler_and_caret() {
        let mut e = editor_with(&["hello"]);
        feed(&mut e, &[press('i')]);
        let frame = painted(&mut e);
        assert_eq!(frame.row_text(0), "     00000");
        assert_eq!(frame.row_text(1), "     01234");
        assert_eq!(frame.row_text(2), "0001 hello");
        assert_eq!(frame.row_text(view::INSERT_PROMPT_ROW), ">");

        answer(&mut e, "4");
        let frame = painted(&mut e);
        assert_eq!(frame.row_text(view::CARET_ROW), "         ^");
        assert_eq!(frame.row_text(view::INSERT_PROMPT_ROW), ":");
    }

    #[test]
    fn insert_on_empty_line_is_rejected() {
        let mut e = editor_with(&[""]);
        feed(&mut e, &[press('i')]);
        assert!(matches!(e.screen, Screen::Main));
        assert_eq!(e.status, Status::from(EditError::NothingToDo));
    }

    #[test]
    fn insert_offset_past_line_is_rejected() {
        let mut e = editor_with(&["abc"]);
        feed(&mut e, &[press('i')]);
        answer(&mut e, "4");
        assert!(matches!(e.screen, Screen::Main));
        assert_eq!(e.status.message, "nothing to do with this");

        feed(&mut e, &[press('i')]);
        answer(&mut e, "-1");
        assert!(matches!(e.screen, Screen::Main));
        assert_eq!(contents(&e), ["abc"]);
    }

    #[test]
    fn insert_at_end_of_line() {
        let mut e = editor_with(&["abc"]);
        feed(&mut e, &[press('i')]);
        answer(&mut e, "3");
        answer(&mut e, "!");
        assert_eq!(contents(&e), ["abc!"]);
    }

    #[test]
    fn insert_rejects_wide_line() {
        let wide = "w".repeat(75);
        let mut e = editor_with(&[wide.as_str()]);
        feed(&mut e, &[press('i')]);
        assert_eq!(e.status, Status::error("line is too long"));
    }

    // ── Navigation ────────────────────────────────────────────────────────

    #[test]
    fn prev_next_head_tail() {
        let mut e = editor_with(&["1", "2", "3", "4", "5"]);
        feed(&mut e, &[press('n'), press('n')]);
        assert_eq!(e.doc.cursor(), 2);
        feed(&mut e, &[press('t')]);
        assert_eq!(e.doc.cursor(), 4);
        feed(&mut e, &[press('P')]);
        answer(&mut e, "3");
        assert_eq!(e.doc.cursor(), 1);
        feed(&mut e, &[press('h')]);
        assert_eq!(e.doc.cursor(), 0);
        feed(&mut e, &[press('N')]);
        answer(&mut e, "99");
        assert_eq!(e.doc.cursor(), 4);
    }

    #[test]
    fn arrows_mirror_commands() {
        let mut e = editor_with(&["1", "2", "3"]);
        feed(&mut e, &[key(KeyCode::Down), key(KeyCode::Down)]);
        assert_eq!(e.doc.cursor(), 2);
        feed(&mut e, &[key(KeyCode::Up)]);
        assert_eq!(e.doc.cursor(), 1);
        feed(&mut e, &[key(KeyCode::End)]);
        assert_eq!(e.doc.cursor(), 2);
        feed(&mut e, &[key(KeyCode::Home)]);
        assert_eq!(e.doc.cursor(), 0);
    }

    #[test]
    fn zero_count_is_nothing_to_do() {
        let mut e = editor_with(&["1", "2"]);
        feed(&mut e, &[press('N')]);
        answer(&mut e, "abc");
        assert_eq!(e.doc.cursor(), 0);
        assert_eq!(e.status.message, "nothing to do with this");
    }

    #[test]
    fn goto_line_past_end() {
        let mut e = editor_with(&["1", "2"]);
        feed(&mut e, &[press('>')]);
        answer(&mut e, "9");
        assert_eq!(e.status, Status::error("no such line"));
        feed(&mut e, &[press('>')]);
        answer(&mut e, "2");
        assert_eq!(e.doc.cursor(), 1);
        assert_eq!(e.status, Status::none());
    }

    // ── Delete ────────────────────────────────────────────────────────────

    #[test]
    fn delete_one_and_many() {
        let mut e = editor_with(&["a", "b", "c", "d"]);
        feed(&mut e, &[press('d')]);
        assert_eq!(contents(&e), ["b", "c", "d"]);
        feed(&mut e, &[press('D')]);
        answer(&mut e, "2");
        assert_eq!(contents(&e), ["d"]);
    }

    // ── Status ────────────────────────────────────────────────────────────

    #[test]
    fn unknown_command_then_cleared() {
        let mut e = editor_with(&["x"]);
        feed(&mut e, &[press('z')]);
        assert_eq!(e.status, Status::error("unknown command"));
        assert_eq!(painted(&mut e).row_text(view::STATUS_ROW), " unknown command");

        feed(&mut e, &[press('h')]);
        assert_eq!(e.status, Status::none());
    }

    #[test]
    fn ctrl_keys_are_unknown() {
        let mut e = editor_with(&["x"]);
        feed(&mut e, &[ctrl('d')]);
        assert_eq!(contents(&e), ["x"]);
        assert_eq!(e.status.kind, StatusKind::Error);
    }

    #[test]
    fn too_many_lines_on_new_line() {
        let lines = vec![""; led_core::limits::MAX_LINE];
        let mut e = editor_with(&lines);
        feed(&mut e, &[enter()]);
        assert_eq!(e.status, Status::error("too many lines!"));
    }

    // ── Confirmation ──────────────────────────────────────────────────────

    #[test]
    fn create_asks_first() {
        let mut e = editor_with(&["a", "b"]);
        feed(&mut e, &[press('c')]);
        assert_eq!(
            painted(&mut e).row_text(view::PROMPT_ROW),
            "any unsaved data will be lost, sure? (y/n)"
        );
        feed(&mut e, &[press('n')]);
        assert_eq!(contents(&e), ["a", "b"]);

        feed(&mut e, &[press('c'), press('y')]);
        assert_eq!(contents(&e), [""]);
        assert!(matches!(e.screen, Screen::Main));
    }

    #[test]
    fn quit_needs_yes() {
        let mut e = editor_with(&["a"]);
        assert_eq!(feed(&mut e, &[press('q'), press('Y')]), Action::Continue);
        assert_eq!(feed(&mut e, &[press('q'), press('y')]), Action::Quit);
    }

    // ── Search ────────────────────────────────────────────────────────────

    #[test]
    fn find_then_repeat() {
        let mut e = editor_with(&["foo", "bar", "foobar"]);
        feed(&mut e, &[press('f')]);
        answer(&mut e, "bar");
        assert_eq!(e.doc.cursor(), 1);
        feed(&mut e, &[press(' ')]);
        assert_eq!(e.doc.cursor(), 2);
        feed(&mut e, &[press(' ')]);
        assert_eq!(e.status, Status::error("nothing found"));
        assert_eq!(e.doc.cursor(), 2);
    }

    #[test]
    fn find_backward_with_empty_answer_repeats() {
        let mut e = editor_with(&["x", "y", "x", "y"]);
        feed(&mut e, &[press('t'), press('F')]);
        answer(&mut e, "x");
        assert_eq!(e.doc.cursor(), 2);
        feed(&mut e, &[press('F')]);
        answer(&mut e, "");
        assert_eq!(e.doc.cursor(), 0);
    }

    #[test]
    fn find_next_without_search() {
        let mut e = editor_with(&["x"]);
        feed(&mut e, &[press(' ')]);
        assert_eq!(e.status.message, "nothing to do with this");
    }

    // ── View all ──────────────────────────────────────────────────────────

    #[test]
    fn pager_walks_pages_and_returns() {
        let mut e = editor_with(&["a", "b", "c"]);
        feed(&mut e, &[press('n'), press('V')]);
        answer(&mut e, "2");

        let frame = painted(&mut e);
        assert_eq!(frame.row_text(0), "view 0001/0003");
        assert_eq!(frame.row_text(3), "press any key to continue...");

        feed(&mut e, &[press('x')]);
        assert_eq!(painted(&mut e).row_text(0), "view 0003/0003");

        feed(&mut e, &[press('x')]);
        assert!(matches!(e.screen, Screen::Main));
        assert_eq!(e.doc.cursor(), 1);
    }

    #[test]
    fn default_view_is_one_page_for_short_documents() {
        let mut e = editor_with(&["a"]);
        feed(&mut e, &[press('v')]);
        assert!(matches!(e.screen, Screen::Pager(_)));
        feed(&mut e, &[press('x')]);
        assert!(matches!(e.screen, Screen::Main));
    }

    #[test]
    fn view_with_bad_count() {
        let mut e = editor_with(&["a"]);
        feed(&mut e, &[press('V')]);
        answer(&mut e, "0");
        assert!(matches!(e.screen, Screen::Main));
        assert_eq!(e.status.message, "nothing to do with this");
    }

    // ── Files ─────────────────────────────────────────────────────────────

    #[test]
    fn save_and_load_through_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        let path_str = path.to_str().unwrap();

        let mut e = editor_with(&["one", "two"]);
        feed(&mut e, &[press('s')]);
        answer(&mut e, path_str);
        assert_eq!(e.status, Status::info("saved"));

        feed(&mut e, &[press('c'), press('y')]);
        assert_eq!(contents(&e), [""]);

        feed(&mut e, &[press('l')]);
        answer(&mut e, path_str);
        assert_eq!(e.status, Status::info("loaded"));
        assert_eq!(contents(&e), ["one", "two"]);
    }

    #[test]
    fn empty_path_is_canceled() {
        let mut e = editor_with(&["x"]);
        feed(&mut e, &[press('s')]);
        answer(&mut e, "");
        assert_eq!(e.status, Status::info("canceled"));
    }

    #[test]
    fn load_failure_keeps_document() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let mut e = editor_with(&["x"]);
        feed(&mut e, &[press('l')]);
        answer(&mut e, missing.to_str().unwrap());
        assert_eq!(e.status, Status::error("file open failed!"));
        assert_eq!(contents(&e), ["x"]);
    }

    #[test]
    fn open_at_startup_reports_on_first_screen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("start.txt");
        std::fs::write(&path, "alpha\nbeta\n").unwrap();

        let mut e = Editor::new();
        e.open(&path);
        assert_eq!(contents(&e), ["alpha", "beta"]);

        feed(&mut e, &[press('x')]);
        let frame = painted(&mut e);
        assert_eq!(frame.row_text(2), "0001 alpha");
        assert_eq!(frame.row_text(view::STATUS_ROW), " loaded");
    }

    // ── Painting ──────────────────────────────────────────────────────────

    #[test]
    fn prompt_cursor_follows_input() {
        let mut e = editor_with(&["x"]);
        feed(&mut e, &[press('>'), press('1'), press('2')]);
        let frame = painted(&mut e);
        assert_eq!(frame.row_text(view::PROMPT_ROW), ">12");
        assert_eq!(e.cursor(), Some((3, view::PROMPT_ROW)));

        feed(&mut e, &[esc()]);
        painted(&mut e);
        assert_eq!(e.cursor(), None);
    }
}
