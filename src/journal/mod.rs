//! Append-only record of the actions a run performs.
//!
//! Every deletion and every move is described by a [`LogEntry`] and handed to
//! an [`ActionSink`]. The pipeline only appends; delivering the log anywhere
//! (mail, dashboards) is left to whoever reads the sink afterwards.
//!
//! Sinks provided here:
//! - [`MemorySink`]: keeps entries in a `Vec`, for tests and callers that
//!   want the entries back
//! - [`CsvSink`]: appends one flushed row per action to a CSV file
//! - [`Tee`]: forwards every entry to two sinks
//!
//! ```
//! use filemop::journal::{Action, ActionSink, Category, LogEntry, MemorySink};
//! use std::path::PathBuf;
//!
//! let mut sink = MemorySink::new();
//! sink.record(&LogEntry::new(Action::Deleted, Category::Empty, PathBuf::from("/tmp/x")))
//!     .unwrap();
//! assert_eq!(sink.len(), 1);
//! ```

pub mod csv;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};
use thiserror::Error;

pub use self::csv::{read_log, CsvSink, LogRow};

/// Timestamp format used in rendered log rows.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What happened to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    /// The file was removed.
    Deleted,
    /// The file was relocated.
    Moved,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted => write!(f, "Deleted"),
            Self::Moved => write!(f, "Moved"),
        }
    }
}

/// Why it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Redundant copy of an earlier file.
    Duplicate,
    /// Zero-byte file.
    Empty,
    /// Failed its format check.
    Corrupted,
    /// Sorted into the folder for this extension.
    Extension(String),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate => write!(f, "Duplicate"),
            Self::Empty => write!(f, "Empty"),
            Self::Corrupted => write!(f, "Corrupted"),
            Self::Extension(ext) => write!(f, "{ext}"),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One immutable action record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    timestamp: DateTime<Local>,
    action: Action,
    category: Category,
    path: PathBuf,
}

impl LogEntry {
    /// Record an action happening now.
    #[must_use]
    pub fn new(action: Action, category: Category, path: PathBuf) -> Self {
        Self::at(Local::now(), action, category, path)
    }

    /// Record an action with an explicit timestamp.
    #[must_use]
    pub fn at(
        timestamp: DateTime<Local>,
        action: Action,
        category: Category,
        path: PathBuf,
    ) -> Self {
        Self {
            timestamp,
            action,
            category,
            path,
        }
    }

    /// When the action happened.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// The action kind.
    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    /// The reason for the action.
    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// The affected path (the source path for moves).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Errors raised by action sinks.
#[derive(Debug, Error)]
pub enum SinkError {
    /// I/O error while opening or writing the log.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

/// Destination for action records.
pub trait ActionSink {
    /// Append one entry. Entries are never rewritten or removed.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the entry could not be stored.
    fn record(&mut self, entry: &LogEntry) -> Result<(), SinkError>;

    /// On-disk location of the log, if any. The walker skips it so a log
    /// kept inside the target directory is never hashed, checked or moved.
    fn location(&self) -> Option<&Path> {
        None
    }
}

impl<S: ActionSink + ?Sized> ActionSink for &mut S {
    fn record(&mut self, entry: &LogEntry) -> Result<(), SinkError> {
        (**self).record(entry)
    }

    fn location(&self) -> Option<&Path> {
        (**self).location()
    }
}

impl<S: ActionSink + ?Sized> ActionSink for Box<S> {
    fn record(&mut self, entry: &LogEntry) -> Result<(), SinkError> {
        (**self).record(entry)
    }

    fn location(&self) -> Option<&Path> {
        (**self).location()
    }
}

/// `None` discards every entry.
impl<S: ActionSink> ActionSink for Option<S> {
    fn record(&mut self, entry: &LogEntry) -> Result<(), SinkError> {
        match self {
            Some(sink) => sink.record(entry),
            None => Ok(()),
        }
    }

    fn location(&self) -> Option<&Path> {
        self.as_ref().and_then(ActionSink::location)
    }
}

/// In-memory sink.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Vec<LogEntry>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in the order they were recorded.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the sink, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

impl ActionSink for MemorySink {
    fn record(&mut self, entry: &LogEntry) -> Result<(), SinkError> {
        self.entries.push(entry.clone());
        Ok(())
    }
}

/// Forwards every entry to two sinks.
///
/// Both sinks are always attempted; the first error is returned.
#[derive(Debug)]
pub struct Tee<A, B> {
    /// First sink
    pub first: A,
    /// Second sink
    pub second: B,
}

impl<A, B> Tee<A, B> {
    /// Combine two sinks.
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: ActionSink, B: ActionSink> ActionSink for Tee<A, B> {
    fn record(&mut self, entry: &LogEntry) -> Result<(), SinkError> {
        let first = self.first.record(entry);
        let second = self.second.record(entry);
        first.and(second)
    }

    fn location(&self) -> Option<&Path> {
        self.first.location().or_else(|| self.second.location())
    }
}
