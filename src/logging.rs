// SPDX-License-Identifier: MIT
//
// Logging setup.
//
// The terminal is busy drawing the editor, so diagnostics go to a file or
// nowhere. `init` installs a fmt subscriber behind a non-blocking file
// writer; the returned guard flushes it when dropped, so main holds on to
// it until the event loop has finished.

use std::io;
use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Send `tracing` events at `level` and above to the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a global subscriber
/// is already installed.
pub fn init(path: &Path, level: Level) -> io::Result<WorkerGuard> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log file path has no file name"))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(io::Error::other)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(level)
        .with_ansi(false)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(guard)
}
