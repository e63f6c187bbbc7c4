//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and collecting [`FileRecord`]s for the pipeline stages.
//!
//! # Walk order
//!
//! The walk is single-threaded and deterministic. Inside every directory
//! the regular files come first, then the subdirectories, each sorted by
//! file name; subdirectories are then descended depth-first. "First in walk
//! order" therefore means: shallower files beat files nested further down,
//! and within a directory the lexicographically smaller name wins.
//!
//! # Example
//!
//! ```no_run
//! use filemop::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! let (files, errors) = walker.collect_files();
//! println!("{} files, {} unreadable entries", files.len(), errors.len());
//! ```

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{FileRecord, ScanError, WalkerConfig};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use filemop::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// ```
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Root directory of this walker.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the directory tree, yielding regular files.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration. Entries that vanish mid-walk surface as
    /// [`ScanError::NotFound`].
    pub fn walk(&self) -> impl Iterator<Item = Result<FileRecord, ScanError>> + '_ {
        let skip_hidden = self.config.skip_hidden;

        WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .min_depth(1)
            .sort_by(walk_order)
            .into_iter()
            .filter_entry(move |entry| !(skip_hidden && is_hidden(entry)))
            .filter_map(move |result| self.process_entry(result))
    }

    /// Snapshot a complete walk.
    ///
    /// Stages act on the snapshot so that files they create or move are
    /// never fed back into the same walk.
    #[must_use]
    pub fn collect_files(&self) -> (Vec<FileRecord>, Vec<ScanError>) {
        let mut files = Vec::new();
        let mut errors = Vec::new();
        for result in self.walk() {
            match result {
                Ok(file) => files.push(file),
                Err(e) => errors.push(e),
            }
        }
        log::debug!(
            "Walked {}: {} files, {} errors",
            self.root.display(),
            files.len(),
            errors.len()
        );
        (files, errors)
    }

    fn process_entry(
        &self,
        result: Result<DirEntry, walkdir::Error>,
    ) -> Option<Result<FileRecord, ScanError>> {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => return Some(Err(self.handle_walk_error(e))),
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            return None;
        }

        let path = entry.path();
        if file_type.is_symlink() && !self.config.follow_symlinks {
            log::trace!("Skipping symlink: {}", path.display());
            return None;
        }

        if self.config.excluded.iter().any(|excluded| excluded == path) {
            log::debug!("Skipping excluded path: {}", path.display());
            return None;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => return Some(Err(self.handle_walk_error(e))),
        };

        // Sockets, FIFOs and device nodes are left alone
        if !metadata.is_file() {
            return None;
        }

        Some(Ok(FileRecord::new(path.to_path_buf(), metadata.len())))
    }

    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        let message = error.to_string();

        let scan_error = match error.into_io_error() {
            Some(io) => ScanError::from_io(&path, io),
            None => ScanError::Io {
                path,
                source: std::io::Error::other(message),
            },
        };

        match &scan_error {
            ScanError::NotFound(p) => {
                log::debug!("File not found (may have been deleted): {}", p.display());
            }
            ScanError::PermissionDenied(p) => log::warn!("Permission denied: {}", p.display()),
            ScanError::Io { path, source } => {
                log::warn!("I/O error for {}: {}", path.display(), source);
            }
        }
        scan_error
    }
}

/// Files before directories, then by file name.
fn walk_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Dot-prefixed entries below the root.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}
