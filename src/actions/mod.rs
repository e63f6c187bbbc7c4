//! File actions module.
//!
//! This module provides the two mutations a run performs:
//! - Deletion with size verification ([`delete`])
//! - Relocation into a folder with an explicit collision policy ([`relocate`])
//!
//! Stages go through a [`Recorder`], which performs the action, appends it to
//! the [`ActionSink`] right after it succeeds, and collects per-file errors
//! instead of aborting.
//!
//! ```no_run
//! use filemop::actions::Recorder;
//! use filemop::journal::{Category, MemorySink};
//! use std::path::Path;
//!
//! let mut sink = MemorySink::new();
//! let mut recorder = Recorder::new(&mut sink);
//! recorder.delete(Path::new("/tmp/empty.txt"), 0, Category::Empty);
//! let errors = recorder.into_errors();
//! ```

pub mod delete;
pub mod relocate;

use std::path::Path;

// Re-export commonly used types
pub use delete::{delete_file, delete_verified};
pub use relocate::{relocate, CollisionPolicy, Placement};

use crate::error::FileError;
use crate::journal::{Action, ActionSink, Category, LogEntry};

/// Performs actions, logs them, and collects failures.
pub struct Recorder<'a> {
    sink: &'a mut dyn ActionSink,
    errors: Vec<FileError>,
}

impl<'a> Recorder<'a> {
    /// Create a recorder writing to `sink`.
    pub fn new(sink: &'a mut dyn ActionSink) -> Self {
        Self {
            sink,
            errors: Vec::new(),
        }
    }

    /// Delete `path` if it still has `expected_size` bytes.
    ///
    /// Returns `true` when the file was deleted. Failures are collected.
    pub fn delete(&mut self, path: &Path, expected_size: u64, category: Category) -> bool {
        match delete_verified(path, expected_size) {
            Ok(()) => {
                log::debug!("Deleted ({}): {}", category, path.display());
                self.append(LogEntry::new(Action::Deleted, category, path.to_path_buf()));
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    /// Delete `path` without size verification.
    ///
    /// Returns `true` when the file was deleted. Failures are collected.
    pub fn delete_unchecked(&mut self, path: &Path, category: Category) -> bool {
        match delete_file(path) {
            Ok(()) => {
                log::debug!("Deleted ({}): {}", category, path.display());
                self.append(LogEntry::new(Action::Deleted, category, path.to_path_buf()));
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    /// Move `path` into `dest_dir`, logging it under `category`.
    ///
    /// Returns `true` only when the file actually moved; a file already in
    /// place is neither moved nor logged.
    pub fn relocate(
        &mut self,
        path: &Path,
        dest_dir: &Path,
        policy: CollisionPolicy,
        category: Category,
    ) -> bool {
        match relocate(path, dest_dir, policy) {
            Ok(Placement::Moved(_)) => {
                self.append(LogEntry::new(Action::Moved, category, path.to_path_buf()));
                true
            }
            Ok(Placement::AlreadyInPlace) => {
                log::trace!("Already in place: {}", path.display());
                false
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    /// Collect a non-fatal per-file error.
    pub fn report(&mut self, error: FileError) {
        match &error {
            FileError::Vanished(path) => {
                log::warn!("Skipping vanished file: {}", path.display());
            }
            FileError::Collision { .. } => {}
            other => log::warn!("{other}"),
        }
        self.errors.push(error);
    }

    /// Errors collected so far.
    #[must_use]
    pub fn errors(&self) -> &[FileError] {
        &self.errors
    }

    /// Consume the recorder, returning collected errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<FileError> {
        self.errors
    }

    fn append(&mut self, entry: LogEntry) {
        if let Err(e) = self.sink.record(&entry) {
            log::error!(
                "Failed to record {} of {}: {}",
                entry.action(),
                entry.path().display(),
                e
            );
            self.errors.push(FileError::Journal {
                path: entry.path().to_path_buf(),
                message: e.to_string(),
            });
        }
    }
}
