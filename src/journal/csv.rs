//! CSV action log.
//!
//! One row is appended for every action and flushed immediately, so a crash
//! can at worst lose the row being written; earlier rows are never touched.
//!
//! # Columns
//!
//! - `Timestamp`: local time, `%Y-%m-%d %H:%M:%S`
//! - `Action`: `Deleted` or `Moved`
//! - `File Type`: `Duplicate`, `Empty`, `Corrupted`, or the extension name
//! - `File Name`: path of the affected file (source path for moves)
//!
//! The header is written only when the file is created or empty, so the same
//! log keeps growing across runs.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ActionSink, LogEntry, SinkError, TIMESTAMP_FORMAT};

const HEADER: [&str; 4] = ["Timestamp", "Action", "File Type", "File Name"];

/// A row of the CSV log as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRow {
    /// Rendered timestamp
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    /// `Deleted` or `Moved`
    #[serde(rename = "Action")]
    pub action: String,
    /// Category name
    #[serde(rename = "File Type")]
    pub category: String,
    /// Affected path
    #[serde(rename = "File Name")]
    pub path: String,
}

impl From<&LogEntry> for LogRow {
    fn from(entry: &LogEntry) -> Self {
        Self {
            timestamp: entry.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            action: entry.action().to_string(),
            category: entry.category().to_string(),
            path: entry.path().to_string_lossy().to_string(),
        }
    }
}

/// Append-only CSV sink.
pub struct CsvSink {
    path: PathBuf,
    writer: ::csv::Writer<File>,
}

impl std::fmt::Debug for CsvSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSink").field("path", &self.path).finish()
    }
}

impl CsvSink {
    /// Open `path` for appending, creating it (and its parent directories)
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the file cannot be opened or the header
    /// cannot be written.
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_new = file.metadata()?.len() == 0;

        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(HEADER)?;
            writer.flush()?;
        }

        let path = fs::canonicalize(path)?;
        log::debug!("Action log: {}", path.display());
        Ok(Self { path, writer })
    }

    /// Canonical path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ActionSink for CsvSink {
    fn record(&mut self, entry: &LogEntry) -> Result<(), SinkError> {
        self.writer.serialize(LogRow::from(entry))?;
        self.writer.flush()?;
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Read every row of a CSV action log.
///
/// # Errors
///
/// Returns [`SinkError`] if the file cannot be read or a row is malformed.
pub fn read_log(path: &Path) -> Result<Vec<LogRow>, SinkError> {
    let mut reader = ::csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
