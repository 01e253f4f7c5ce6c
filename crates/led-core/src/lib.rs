//! # led-core — Line buffer engine for led
//!
//! This crate contains everything the editor knows about text:
//!
//! - **[`limits`]** — capacity constants (lines, bytes per line, insert width)
//! - **[`line`]** — `Line`, a capacity-bounded byte string, and input normalization
//! - **[`document`]** — `Document`, the line list with a cursor, and every edit
//! - **[`search`]** — resumable forward/backward substring search
//! - **[`file`]** — plain-text load and save
//! - **[`status`]** — `EditError`, `Notice` and the status line model
//! - **[`prompt`]** — the one-line answer box for text and integer prompts
//! - **[`pager`]** — paging through the whole document
//! - **[`view`]** — painters that lay screens out on a led-term `FrameBuffer`

pub mod document;
pub mod file;
pub mod limits;
pub mod line;
pub mod pager;
pub mod prompt;
pub mod search;
pub mod status;
pub mod view;

pub use document::Document;
pub use status::{EditError, Notice, Status, StatusKind};
