//! Search — directional substring search that picks up where it left off.
//!
//! Matching is a literal, case-sensitive byte substring test against whole
//! lines. The search remembers its keyword, its direction and a scan cursor
//! separate from the edit cursor. After a match the scan cursor moves one
//! line past it, so repeating the search never lands on the same line twice
//! in a row.
//!
//! # Search flow
//!
//! 1. `f` / `F` prompt for a keyword → [`Document::start_search`]
//! 2. space repeats → [`Document::find_next`]
//! 3. `f` / `F` with an empty answer repeats too, in the key's direction

use tracing::debug;

use crate::document::Document;
use crate::status::EditError;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Search direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    /// Toward the end of the document.
    Forward,
    /// Toward the top of the document.
    Backward,
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// The remembered search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    keyword: Vec<u8>,
    /// `None` until a search has run.
    direction: Option<Direction>,
    /// Line the next scan starts from. `None` once a backward scan has
    /// run off the top.
    scan_cursor: Option<usize>,
}

impl SearchState {
    /// The last keyword (empty if none).
    #[must_use]
    pub fn keyword(&self) -> &[u8] {
        &self.keyword
    }

    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        self.direction
    }

    #[must_use]
    pub const fn scan_cursor(&self) -> Option<usize> {
        self.scan_cursor
    }
}

// ---------------------------------------------------------------------------
// Document search
// ---------------------------------------------------------------------------

impl Document {
    /// The remembered search.
    #[must_use]
    pub const fn search(&self) -> &SearchState {
        &self.search
    }

    /// Start a new search for `keyword` from the cursor.
    ///
    /// An empty `keyword` repeats the last search in `direction` instead,
    /// and does nothing at all when no keyword was ever given.
    ///
    /// # Errors
    ///
    /// [`EditError::NothingFound`] if no line from the cursor on contains
    /// the keyword.
    pub fn start_search(&mut self, keyword: &[u8], direction: Direction) -> Result<(), EditError> {
        if keyword.is_empty() {
            if self.search.keyword.is_empty() {
                return Ok(());
            }
            self.search.direction = Some(direction);
            return self.find_next();
        }

        self.search = SearchState {
            keyword: keyword.to_vec(),
            direction: Some(direction),
            scan_cursor: Some(self.cursor),
        };
        self.find_next()
    }

    /// Resume the last search from the scan cursor.
    ///
    /// On a match the cursor jumps to the matching line and the scan cursor
    /// moves one past it. Otherwise nothing moves.
    ///
    /// # Errors
    ///
    /// - [`EditError::NothingToDo`] if no search has run yet
    /// - [`EditError::NothingFound`] if the scan reaches the end of the
    ///   document without a match
    pub fn find_next(&mut self) -> Result<(), EditError> {
        let direction = self.search.direction.ok_or(EditError::NothingToDo)?;
        let last = self.lines.len() - 1;
        let keyword = &self.search.keyword;

        let found = match direction {
            Direction::Forward => {
                let start = self.search.scan_cursor.unwrap_or(0);
                (start..=last).find(|&i| self.lines[i].contains(keyword))
            }
            Direction::Backward => self.search.scan_cursor.and_then(|start| {
                (0..=start.min(last))
                    .rev()
                    .find(|&i| self.lines[i].contains(keyword))
            }),
        };

        let Some(index) = found else {
            debug!(?direction, "search exhausted");
            return Err(EditError::NothingFound);
        };

        self.cursor = index;
        self.search.scan_cursor = match direction {
            Direction::Forward => Some(index + 1),
            Direction::Backward => index.checked_sub(1),
        };
        debug!(?direction, line = index, "search match");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
