//! File deletion with snapshot verification.
//!
//! # Overview
//!
//! Stages decide what to delete from a walk snapshot. By the time the
//! deletion runs the file may have changed or disappeared, so every
//! deletion first re-reads the file's metadata and refuses to act when the
//! size no longer matches what the stage saw.
//!
//! # Example
//!
//! ```no_run
//! use filemop::actions::delete::delete_verified;
//! use std::path::Path;
//!
//! match delete_verified(Path::new("/tmp/empty.txt"), 0) {
//!     Ok(()) => println!("deleted"),
//!     Err(e) => eprintln!("skipped: {}", e),
//! }
//! ```

use std::fs;
use std::path::Path;

use crate::error::FileError;

/// Delete `path` unconditionally.
///
/// # Errors
///
/// Returns [`FileError::Vanished`] if the file is already gone,
/// [`FileError::PermissionDenied`] or [`FileError::Io`] otherwise.
pub fn delete_file(path: &Path) -> Result<(), FileError> {
    fs::remove_file(path).map_err(|e| FileError::from_io(path, e))
}

/// Delete `path` only if it is still a regular file of `expected_size`
/// bytes.
///
/// # Errors
///
/// Returns [`FileError::Modified`] when the size changed since the walk,
/// and the errors of [`delete_file`] otherwise.
pub fn delete_verified(path: &Path, expected_size: u64) -> Result<(), FileError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| FileError::from_io(path, e))?;
    if !metadata.is_file() || metadata.len() != expected_size {
        log::warn!(
            "File modified since scan: {} (size {} -> {})",
            path.display(),
            expected_size,
            metadata.len()
        );
        return Err(FileError::Modified(path.to_path_buf()));
    }
    delete_file(path)
}
