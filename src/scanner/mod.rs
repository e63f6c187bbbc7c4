//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Deterministic single-threaded directory walking using walkdir
//! - Content hashing with BLAKE3 in fixed-size blocks
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//!
//! Every pipeline stage consumes [`FileRecord`]s produced by the same
//! [`Walker`], so all stages agree on walk order.
//!
//! # Example
//!
//! ```no_run
//! use filemop::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::{Path, PathBuf};

// Re-export main types
pub use hasher::{hash_to_hex, hex_to_hash, Hash, Hasher, DEFAULT_BLOCK_SIZE, LEGACY_BLOCK_SIZE};
pub use walker::Walker;

/// A file discovered during a walk.
///
/// The digest is computed lazily: only the duplicate detector asks for it,
/// and the result is cached on the record.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes at walk time
    pub size: u64,
    /// Lower-cased extension without the leading dot
    pub extension: Option<String>,
    digest: Option<Hash>,
}

impl FileRecord {
    /// Create a new record, deriving the extension from the path.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        let extension = extension_of(&path);
        Self {
            path,
            size,
            extension,
            digest: None,
        }
    }

    /// Return the content digest, hashing the file on first use.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn digest(&mut self, hasher: &Hasher) -> Result<Hash, HashError> {
        if let Some(hash) = self.digest {
            return Ok(hash);
        }
        let hash = hasher.hash_file(&self.path)?;
        self.digest = Some(hash);
        Ok(hash)
    }

    /// The cached digest, if it has been computed.
    #[must_use]
    pub fn cached_digest(&self) -> Option<Hash> {
        self.digest
    }

    /// Whether this record describes a zero-byte file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Lower-cased extension of `path` without the leading dot.
///
/// Dot-files such as `.bashrc` have no extension, and neither does a
/// trailing dot (`name.`).
#[must_use]
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    /// Warning: May cause infinite loops with symlink cycles.
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,

    /// Absolute paths that are never yielded (e.g. the action log file).
    pub excluded: Vec<PathBuf>,
}

impl WalkerConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(follow_symlinks: bool, skip_hidden: bool) -> Self {
        Self {
            follow_symlinks,
            skip_hidden,
            excluded: Vec::new(),
        }
    }

    /// Add a path that the walker must never yield.
    #[must_use]
    pub fn with_excluded(mut self, path: PathBuf) -> Self {
        self.excluded.push(path);
        self
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The entry disappeared between listing and inspection.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error for `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
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
            Self::PermissionDenied(p) | Self::NotFound(p) | Self::Io { path: p, .. } => p,
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
