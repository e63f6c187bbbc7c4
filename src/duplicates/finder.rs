//! Duplicate finder: hash every file of a walk and group by digest.
//!
//! # Overview
//!
//! Every regular file is hashed, zero-byte files included. Files that fail
//! to hash are reported and left out of the grouping, so a file that cannot
//! be read is never considered a duplicate of anything.
//!
//! Groups come back in the walk position of their first member and keep
//! walk order inside, so "first occurrence wins" is just `files[0]`.
//!
//! # Example
//!
//! ```no_run
//! use filemop::duplicates::DuplicateFinder;
//! use filemop::scanner::{Hasher, WalkerConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(Hasher::new());
//! let (groups, errors) = finder.find_duplicates(Path::new("."), WalkerConfig::default());
//!
//! for group in &groups {
//!     println!("{} copies of {}", group.len(), group.canonical().path.display());
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::actions::Recorder;
use crate::error::FileError;
use crate::journal::Category;
use crate::progress::{self, ProgressCallback};
use crate::scanner::{FileRecord, Hasher, Walker, WalkerConfig};

use super::groups::{group_by_digest, DuplicateGroup};

/// Hashes files and groups identical ones.
#[derive(Clone)]
pub struct DuplicateFinder {
    hasher: Hasher,
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for DuplicateFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuplicateFinder")
            .field("hasher", &self.hasher)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl DuplicateFinder {
    /// Create a finder using `hasher`.
    #[must_use]
    pub fn new(hasher: Hasher) -> Self {
        Self {
            hasher,
            progress: None,
        }
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Walk `root` once and return its duplicate groups.
    ///
    /// Walk errors and hash failures are returned alongside the groups.
    #[must_use]
    pub fn find_duplicates(
        &self,
        root: &Path,
        walker_config: WalkerConfig,
    ) -> (Vec<DuplicateGroup>, Vec<FileError>) {
        let (files, scan_errors) = Walker::new(root, walker_config).collect_files();
        let (groups, mut errors) = self.group_files(files);
        errors.extend(scan_errors.into_iter().map(FileError::from));
        (groups, errors)
    }

    /// Hash a walk snapshot and group it by digest.
    ///
    /// `files` must be in walk order; the order decides which copy is kept.
    #[must_use]
    pub fn group_files(&self, files: Vec<FileRecord>) -> (Vec<DuplicateGroup>, Vec<FileError>) {
        let mut errors = Vec::new();
        let mut hashed = Vec::with_capacity(files.len());

        for (index, mut file) in files.into_iter().enumerate() {
            progress::tick(self.progress.as_deref(), index + 1, &file.path);
            match file.digest(&self.hasher) {
                Ok(hash) => hashed.push((hash, file)),
                Err(e) => {
                    log::debug!("Failed to hash {}: {}", file.path.display(), e);
                    errors.push(FileError::from(e));
                }
            }
        }

        let groups = group_by_digest(hashed);
        log::debug!(
            "Found {} duplicate groups ({} redundant files)",
            groups.len(),
            groups.iter().map(|g| g.redundant().len()).sum::<usize>()
        );
        (groups, errors)
    }
}

/// Delete every non-canonical member of `groups`.
///
/// Returns the number of files deleted. Each deletion is logged as
/// [`Category::Duplicate`]; failures are collected by `recorder`.
pub fn remove_redundant(groups: &[DuplicateGroup], recorder: &mut Recorder<'_>) -> usize {
    let mut deleted = 0;
    for group in groups {
        log::debug!(
            "Keeping {} ({} copies)",
            group.canonical().path.display(),
            group.redundant().len()
        );
        for file in group.redundant() {
            if recorder.delete(&file.path, file.size, Category::Duplicate) {
                deleted += 1;
            }
        }
    }
    deleted
}
