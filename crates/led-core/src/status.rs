//! Status line model — what the last command has to say.
//!
//! Core operations return `Result<_, EditError>`. Rejections are
//! [`EditError`] variants whose `Display` is the exact text shown to the
//! user; successes worth mentioning are [`Notice`]s. Both convert into a
//! [`Status`], the (kind, message) pair the shell paints under the window.
//! A status lives for one screen only.

use std::fmt;
use std::io;

use thiserror::Error;

// ---------------------------------------------------------------------------
// StatusKind / Status
// ---------------------------------------------------------------------------

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Error,
}

/// A transient message for the status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    /// An empty informational status (nothing to say).
    #[must_use]
    pub const fn none() -> Self {
        Self {
            kind: StatusKind::Info,
            message: String::new(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, StatusKind::Error)
    }
}

impl From<&EditError> for Status {
    fn from(err: &EditError) -> Self {
        Self::error(err.to_string())
    }
}

impl From<EditError> for Status {
    fn from(err: EditError) -> Self {
        Self::from(&err)
    }
}

impl From<Notice> for Status {
    fn from(notice: Notice) -> Self {
        Self::info(notice.to_string())
    }
}

// ---------------------------------------------------------------------------
// EditError
// ---------------------------------------------------------------------------

/// Why a command was rejected or degraded.
///
/// Validation failures leave the document untouched. The two exceptions
/// are [`LineTooLong`](EditError::LineTooLong), reported after a truncated
/// append or insert went through anyway, and
/// [`LoadStoppedHalfWay`](EditError::LoadStoppedHalfWay), which keeps the
/// lines that were read.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("nothing to do with this")]
    NothingToDo,

    /// Storage capacity was hit; whatever fitted was still written.
    #[error("line is too long!")]
    LineTooLong,

    /// The current line is too wide for the insert command.
    #[error("line is too long")]
    NotInsertable,

    #[error("too many lines!")]
    TooManyLines,

    #[error("no such line")]
    NoSuchLine,

    #[error("nothing found")]
    NothingFound,

    #[error("file open failed!")]
    FileOpen(#[source] io::Error),

    #[error("file write failed!")]
    FileWrite(#[source] io::Error),

    #[error("file loading stopped half way")]
    LoadStoppedHalfWay,

    #[error("unknown command")]
    UnknownCommand,
}

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// A successful outcome worth an informational status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The user gave an empty answer to a prompt.
    Canceled,
    Saved,
    Loaded,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Canceled => "canceled",
            Self::Saved => "saved",
            Self::Loaded => "loaded",
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
