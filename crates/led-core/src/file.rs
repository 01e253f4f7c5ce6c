//! Persistence — plain text in, plain text out.
//!
//! The on-disk format is one document line per text line, each terminated
//! by `\n`, with no header. Loading splits records longer than
//! [`LINE_CAPACITY`] into several lines and normalizes tabs to spaces; a
//! document holds at most `MAX_LINE - 1` loaded lines.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::document::Document;
use crate::limits::{LINE_CAPACITY, MAX_LINE};
use crate::line::{Line, normalize_input};
use crate::status::{EditError, Notice};

/// Lines a load may fill before it gives up.
const LOAD_LIMIT: usize = MAX_LINE - 1;

impl Document {
    // ---------------------------------------------------------------------
    // Save
    // ---------------------------------------------------------------------

    /// Write every line to `path`, replacing whatever was there.
    ///
    /// An empty `path` means the prompt was canceled; no I/O happens.
    ///
    /// # Errors
    ///
    /// - [`EditError::FileOpen`] if `path` cannot be created
    /// - [`EditError::FileWrite`] if writing fails part way
    pub fn save(&self, path: &Path) -> Result<Notice, EditError> {
        if path.as_os_str().is_empty() {
            return Ok(Notice::Canceled);
        }
        let file = File::create(path).map_err(|err| {
            warn!(path = %path.display(), %err, "save: open failed");
            EditError::FileOpen(err)
        })?;

        let mut writer = BufWriter::new(file);
        self.save_to(&mut writer)
            .and_then(|()| writer.flush())
            .map_err(|err| {
                warn!(path = %path.display(), %err, "save: write failed");
                EditError::FileWrite(err)
            })?;

        debug!(path = %path.display(), lines = self.lines.len(), "saved");
        Ok(Notice::Saved)
    }

    /// Write every line to `writer`, each followed by `\n`.
    ///
    /// # Errors
    ///
    /// Whatever `writer` reports.
    pub fn save_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for line in &self.lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Load
    // ---------------------------------------------------------------------

    /// Replace the document with the contents of `path`.
    ///
    /// An empty `path` means the prompt was canceled; no I/O happens. If the
    /// file cannot be opened the document is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - [`EditError::FileOpen`] if `path` cannot be opened
    /// - [`EditError::LoadStoppedHalfWay`] if the file has more lines than
    ///   fit, or reading fails part way; what was read is kept
    pub fn load(&mut self, path: &Path) -> Result<Notice, EditError> {
        if path.as_os_str().is_empty() {
            return Ok(Notice::Canceled);
        }
        let file = File::open(path).map_err(|err| {
            warn!(path = %path.display(), %err, "load: open failed");
            EditError::FileOpen(err)
        })?;

        let result = self.load_from(BufReader::new(file));
        debug!(
            path = %path.display(),
            lines = self.lines.len(),
            complete = result.is_ok(),
            "loaded"
        );
        result
    }

    /// Reset the document and fill it from `reader`, one line per record.
    ///
    /// An empty source leaves a single blank line. The cursor ends on the
    /// first line.
    ///
    /// # Errors
    ///
    /// [`EditError::LoadStoppedHalfWay`] if the source holds more than
    /// `MAX_LINE - 1` lines or a read fails; the lines read so far are kept.
    pub fn load_from<R: BufRead>(&mut self, mut reader: R) -> Result<Notice, EditError> {
        self.reset();

        let mut lines = Vec::new();
        let mut record = Vec::new();
        let outcome = loop {
            record.clear();
            match reader.read_until(b'\n', &mut record) {
                Ok(0) => break Ok(Notice::Loaded),
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, read = lines.len(), "load: read failed");
                    break Err(EditError::LoadStoppedHalfWay);
                }
            }
            if !push_record(&mut lines, &normalize_input(&record)) {
                warn!(limit = LOAD_LIMIT, "load: too many lines");
                break Err(EditError::LoadStoppedHalfWay);
            }
        };

        if !lines.is_empty() {
            self.lines = lines;
        }
        outcome
    }
}

/// Append `record` to `lines` in chunks of at most [`LINE_CAPACITY`] bytes.
/// Returns `false` once [`LOAD_LIMIT`] stops it.
///
/// Chunks fill a whole line (255 bytes), one more than the 254-byte reads
/// of the C editor, so a record that fits a line is never split.
fn push_record(lines: &mut Vec<Line>, record: &[u8]) -> bool {
    if record.is_empty() {
        return push_line(lines, Line::new());
    }
    record
        .chunks(LINE_CAPACITY)
        .all(|chunk| push_line(lines, Line::from_bytes(chunk)))
}

fn push_line(lines: &mut Vec<Line>, line: Line) -> bool {
    if lines.len() >= LOAD_LIMIT {
        return false;
    }
    lines.push(line);
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
