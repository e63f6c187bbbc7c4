//! Structured error handling and exit codes.
//!
//! Two layers of errors exist:
//! - [`CleanError`]: fatal, raised before any stage runs (bad target path).
//! - [`FileError`]: per-file, non-fatal, collected into the run result
//!   while the run carries on.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::scanner::{HashError, ScanError};

/// Exit codes for the filemop application.
///
/// - 0: Success (run completed without per-file errors)
/// - 1: General error (unexpected failure)
/// - 2: Invalid target (path missing or not a directory)
/// - 3: Partial success (run completed with some non-fatal per-file errors)
/// - 130: Interrupted by user (Ctrl+C during repeat mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Run completed without errors.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Invalid target: the directory to clean is missing or not a directory.
    InvalidTarget = 2,
    /// Partial success: Run completed but some files could not be handled.
    PartialSuccess = 3,
    /// Interrupted: Repeat mode was stopped by the user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "FM000",
            Self::GeneralError => "FM001",
            Self::InvalidTarget => "FM002",
            Self::PartialSuccess => "FM003",
            Self::Interrupted => "FM130",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "FM001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the operation was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}

/// Fatal errors that abort a run before any stage touches the tree.
#[derive(Debug, Error)]
pub enum CleanError {
    /// The target directory does not exist.
    #[error("Target not found: {0}")]
    NotFound(PathBuf),

    /// The target exists but is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The target could not be inspected or resolved.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Target path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl CleanError {
    /// Exit code the CLI reports for this error.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::NotFound(_) | Self::NotADirectory(_) => ExitCode::InvalidTarget,
            Self::Io { .. } => ExitCode::GeneralError,
        }
    }
}

/// Coarse classification of a [`FileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileErrorKind {
    /// The file vanished between listing and acting.
    NotFound,
    /// Access denied.
    Permission,
    /// The file changed after the walk.
    Modified,
    /// Any other I/O failure.
    Io,
    /// A move target already existed.
    Collision,
    /// The action log could not be written.
    Journal,
}

/// A per-file failure. Never aborts a run.
#[derive(Debug, Error)]
pub enum FileError {
    /// File disappeared before the action could run.
    #[error("file vanished before it could be processed: {0}")]
    Vanished(PathBuf),

    /// Permission denied while reading, deleting or moving.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// File changed after the walk; the action was not taken.
    #[error("file modified since scan: {0}")]
    Modified(PathBuf),

    /// Other I/O failure.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Destination of a move already exists; the file was left in place.
    #[error("destination already exists, {source_path} left in place: {destination}")]
    Collision {
        /// File that was not moved
        source_path: PathBuf,
        /// Existing file at the destination
        destination: PathBuf,
    },

    /// The action succeeded but could not be appended to the action log.
    #[error("could not record action for {path}: {message}")]
    Journal {
        /// Path of the action that went unrecorded
        path: PathBuf,
        /// Sink error message
        message: String,
    },
}

impl FileError {
    /// Classify an I/O error for `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::Vanished(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Vanished(p)
            | Self::PermissionDenied(p)
            | Self::Modified(p)
            | Self::Io { path: p, .. }
            | Self::Collision { source_path: p, .. }
            | Self::Journal { path: p, .. } => p,
        }
    }

    /// Coarse kind, for summaries and JSON output.
    #[must_use]
    pub fn kind(&self) -> FileErrorKind {
        match self {
            Self::Vanished(_) => FileErrorKind::NotFound,
            Self::PermissionDenied(_) => FileErrorKind::Permission,
            Self::Modified(_) => FileErrorKind::Modified,
            Self::Io { .. } => FileErrorKind::Io,
            Self::Collision { .. } => FileErrorKind::Collision,
            Self::Journal { .. } => FileErrorKind::Journal,
        }
    }
}

impl From<ScanError> for FileError {
    fn from(error: ScanError) -> Self {
        match error {
            ScanError::NotFound(p) => Self::Vanished(p),
            ScanError::PermissionDenied(p) => Self::PermissionDenied(p),
            ScanError::Io { path, source } => Self::Io { path, source },
        }
    }
}

impl From<HashError> for FileError {
    fn from(error: HashError) -> Self {
        match error {
            HashError::NotFound(p) => Self::Vanished(p),
            HashError::PermissionDenied(p) => Self::PermissionDenied(p),
            HashError::Io { path, source } => Self::Io { path, source },
        }
    }
}
