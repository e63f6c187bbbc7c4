//! Extension-based reorganization.
//!
//! Every file with an extension ends up in `<root>/<ext>/`, the extension
//! lower-cased and without its dot. Files without an extension stay where
//! they are. A file already inside its folder is not touched, so organizing
//! an organized tree does nothing.

use std::path::{Path, PathBuf};

use crate::actions::{CollisionPolicy, Recorder};
use crate::journal::Category;
use crate::progress::{self, ProgressCallback};
use crate::scanner::FileRecord;

/// Moves files into per-extension folders under a root.
#[derive(Debug, Clone)]
pub struct Organizer {
    root: PathBuf,
    collision: CollisionPolicy,
}

impl Organizer {
    /// Create an organizer for `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, collision: CollisionPolicy) -> Self {
        Self {
            root: root.into(),
            collision,
        }
    }

    /// Folder a file with extension `ext` belongs in.
    #[must_use]
    pub fn destination_for(&self, ext: &str) -> PathBuf {
        self.root.join(ext)
    }

    /// Move every file of a walk snapshot into its extension folder.
    ///
    /// Returns the number of files moved.
    pub fn organize(
        &self,
        files: &[FileRecord],
        recorder: &mut Recorder<'_>,
        progress: Option<&dyn ProgressCallback>,
    ) -> usize {
        let mut moved = 0;
        for (index, file) in files.iter().enumerate() {
            progress::tick(progress, index + 1, &file.path);
            let Some(ext) = &file.extension else {
                continue;
            };
            if self.place(&file.path, ext, recorder) {
                moved += 1;
            }
        }
        moved
    }

    fn place(&self, path: &Path, ext: &str, recorder: &mut Recorder<'_>) -> bool {
        let dest_dir = self.destination_for(ext);
        recorder.relocate(
            path,
            &dest_dir,
            self.collision,
            Category::Extension(ext.to_string()),
        )
    }
}
