//! JSON run summary.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "summary": {
//!     "root": "/srv/inbox",
//!     "duplicates_deleted": 2,
//!     "empty_deleted": 1,
//!     "corrupted_deleted": 0,
//!     "moved": 14,
//!     "errors": 1,
//!     "duration_ms": 87,
//!     "exit_code": 3,
//!     "exit_code_name": "FM003"
//!   },
//!   "actions": [
//!     { "timestamp": "2024-05-06T07:08:09+02:00", "action": "Deleted",
//!       "category": "Duplicate", "path": "/srv/inbox/b.txt" }
//!   ],
//!   "errors": [
//!     { "path": "/srv/inbox/a.txt", "kind": "collision", "message": "..." }
//!   ]
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::error::{FileError, FileErrorKind};
use crate::journal::LogEntry;
use crate::pipeline::RunResult;

/// Summary counts in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Canonical target directory
    pub root: String,
    /// Redundant copies deleted
    pub duplicates_deleted: usize,
    /// Zero-byte files deleted
    pub empty_deleted: usize,
    /// Corrupted files deleted
    pub corrupted_deleted: usize,
    /// Files moved into extension folders
    pub moved: usize,
    /// Number of per-file errors
    pub errors: usize,
    /// Duration of the run in milliseconds
    pub duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "FM000")
    pub exit_code_name: String,
}

/// A per-file error in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonFileError {
    /// Affected path
    pub path: String,
    /// Error classification
    pub kind: FileErrorKind,
    /// Human-readable message
    pub message: String,
}

impl From<&FileError> for JsonFileError {
    fn from(error: &FileError) -> Self {
        Self {
            path: error.path().to_string_lossy().into_owned(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Counts and exit status
    pub summary: JsonSummary,
    /// Actions taken, in order
    pub actions: Vec<LogEntry>,
    /// Per-file errors
    pub errors: Vec<JsonFileError>,
}

impl JsonOutput {
    /// Build the output for one run.
    #[must_use]
    pub fn new(result: &RunResult, actions: &[LogEntry]) -> Self {
        let exit_code = result.exit_code();
        Self {
            summary: JsonSummary {
                root: result.root.to_string_lossy().into_owned(),
                duplicates_deleted: result.counts.duplicates_deleted,
                empty_deleted: result.counts.empty_deleted,
                corrupted_deleted: result.counts.corrupted_deleted,
                moved: result.counts.moved,
                errors: result.errors.len(),
                duration_ms: u64::try_from(result.duration.as_millis()).unwrap_or(u64::MAX),
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
            },
            actions: actions.to_vec(),
            errors: result.errors.iter().map(JsonFileError::from).collect(),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
