//! Integrity validation.
//!
//! Files are dispatched on their lower-cased extension:
//!
//! | Category | Extensions                       | Check                       |
//! |----------|----------------------------------|-----------------------------|
//! | PDF      | `pdf`                            | document parse + page walk  |
//! | Image    | `jpg` `jpeg` `png` `bmp` `gif`   | header decode               |
//! | Text     | `txt` `csv` `log` `json` `xml`   | full read as UTF-8          |
//!
//! Anything else is [`Verdict::Unchecked`].
//!
//! A failed parse means the file is corrupted and gets deleted. A failed
//! read is different: the file may be fine and merely locked, so by default
//! it is kept and reported ([`UnreadablePolicy::Report`]).

pub mod checks;
#[cfg(test)]
pub(crate) mod fixtures;

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::actions::Recorder;
use crate::error::FileError;
use crate::journal::Category;
use crate::progress::{self, ProgressCallback};
use crate::scanner::FileRecord;

pub use checks::CheckError;

/// Validation category of a file, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    /// PDF documents
    Pdf,
    /// Raster images
    Image,
    /// Text-like files
    Text,
}

impl FileCategory {
    /// Category for a lower-cased extension, if it is one that gets checked.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" | "png" | "bmp" | "gif" => Some(Self::Image),
            "txt" | "csv" | "log" | "json" | "xml" => Some(Self::Text),
            _ => None,
        }
    }

    fn check(self, path: &Path) -> Result<(), CheckError> {
        match self {
            Self::Pdf => checks::check_pdf(path),
            Self::Image => checks::check_image(path),
            Self::Text => checks::check_text(path),
        }
    }
}

/// Result of validating one file.
#[derive(Debug)]
pub enum Verdict {
    /// The file passed its check.
    Healthy,
    /// No check exists for this extension.
    Unchecked,
    /// The content failed to parse.
    Corrupted(String),
    /// The file could not be read.
    Unreadable(io::Error),
}

impl Verdict {
    /// Whether the file should be deleted as corrupted.
    #[must_use]
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Self::Corrupted(_))
    }
}

/// What to do with files that cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreadablePolicy {
    /// Keep the file and report an error.
    #[default]
    Report,
    /// Delete it like a corrupted file.
    Delete,
}

/// Runs format checks and removes corrupted files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: UnreadablePolicy,
}

impl Validator {
    /// Create a validator with the given unreadable-file policy.
    #[must_use]
    pub fn new(policy: UnreadablePolicy) -> Self {
        Self { policy }
    }

    /// Check a single file.
    #[must_use]
    pub fn check(&self, path: &Path) -> Verdict {
        let Some(category) = crate::scanner::extension_of(path)
            .as_deref()
            .and_then(FileCategory::from_extension)
        else {
            return Verdict::Unchecked;
        };

        match category.check(path) {
            Ok(()) => Verdict::Healthy,
            Err(CheckError::Decode(reason)) => Verdict::Corrupted(reason),
            Err(CheckError::Io(e)) => Verdict::Unreadable(e),
        }
    }

    /// Check every file of a walk snapshot and delete the corrupted ones.
    ///
    /// Returns the number of files deleted.
    pub fn validate(
        &self,
        files: &[FileRecord],
        recorder: &mut Recorder<'_>,
        progress: Option<&dyn ProgressCallback>,
    ) -> usize {
        let mut deleted = 0;
        for (index, file) in files.iter().enumerate() {
            progress::tick(progress, index + 1, &file.path);
            match self.check(&file.path) {
                Verdict::Healthy | Verdict::Unchecked => {}
                Verdict::Corrupted(reason) => {
                    log::debug!("Corrupted: {} ({})", file.path.display(), reason);
                    if recorder.delete(&file.path, file.size, Category::Corrupted) {
                        deleted += 1;
                    }
                }
                Verdict::Unreadable(e) => {
                    let vanished = e.kind() == io::ErrorKind::NotFound;
                    if self.policy == UnreadablePolicy::Delete && !vanished {
                        log::debug!("Unreadable, deleting: {} ({})", file.path.display(), e);
                        if recorder.delete_unchecked(&file.path, Category::Corrupted) {
                            deleted += 1;
                        }
                    } else {
                        recorder.report(FileError::from_io(&file.path, e));
                    }
                }
            }
        }
        deleted
    }
}
