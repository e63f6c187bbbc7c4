//! Moving files into their destination folder.
//!
//! A move never overwrites an existing file. What happens instead is set by
//! [`CollisionPolicy`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FileError;

/// What to do when the destination name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Leave the file where it is and report a collision.
    #[default]
    Skip,
    /// Move under the first free `name (N).ext` name.
    Rename,
}

/// Result of a successful [`relocate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The file already lives in the destination folder; nothing was done.
    AlreadyInPlace,
    /// The file now lives at this path.
    Moved(PathBuf),
}

/// Move `source` into `dest_dir`, creating the folder if needed.
///
/// # Errors
///
/// - [`FileError::Vanished`] if `source` is gone
/// - [`FileError::Collision`] under [`CollisionPolicy::Skip`] when the name
///   is taken
/// - I/O errors from creating the folder or renaming
pub fn relocate(
    source: &Path,
    dest_dir: &Path,
    policy: CollisionPolicy,
) -> Result<Placement, FileError> {
    if source.parent() == Some(dest_dir) {
        return Ok(Placement::AlreadyInPlace);
    }

    // Check the source first so a vanished file never leaves an empty folder
    fs::symlink_metadata(source).map_err(|e| FileError::from_io(source, e))?;

    let file_name = source.file_name().ok_or_else(|| FileError::Io {
        path: source.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
    })?;

    fs::create_dir_all(dest_dir).map_err(|e| FileError::from_io(dest_dir, e))?;

    let candidate = dest_dir.join(file_name);
    let destination = if exists(&candidate) {
        match policy {
            CollisionPolicy::Skip => {
                log::warn!(
                    "Not moving {}: {} already exists",
                    source.display(),
                    candidate.display()
                );
                return Err(FileError::Collision {
                    source_path: source.to_path_buf(),
                    destination: candidate,
                });
            }
            CollisionPolicy::Rename => unique_destination(dest_dir, source),
        }
    } else {
        candidate
    };

    fs::rename(source, &destination).map_err(|e| FileError::from_io(source, e))?;
    log::debug!("Moved {} -> {}", source.display(), destination.display());
    Ok(Placement::Moved(destination))
}

fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// First free `stem (N).ext` name in `dest_dir`.
fn unique_destination(dest_dir: &Path, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| String::from("file"));
    let extension = source.extension().map(|ext| ext.to_string_lossy().to_string());

    let mut index = 1;
    loop {
        let mut name = format!("{stem} ({index})");
        if let Some(ext) = &extension {
            name.push('.');
            name.push_str(ext);
        }
        let candidate = dest_dir.join(name);
        if !exists(&candidate) {
            return candidate;
        }
        index += 1;
    }
}
