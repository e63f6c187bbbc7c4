//! Empty-file sweep.
//!
//! Deletes every zero-byte regular file of a walk snapshot. The size is
//! checked again right before deleting, so a file that received content
//! after the walk is left alone.

use crate::actions::Recorder;
use crate::journal::Category;
use crate::progress::{self, ProgressCallback};
use crate::scanner::FileRecord;

/// Delete the zero-byte files in `files`.
///
/// Returns the number of files deleted.
pub fn sweep_empty(
    files: &[FileRecord],
    recorder: &mut Recorder<'_>,
    progress: Option<&dyn ProgressCallback>,
) -> usize {
    let mut deleted = 0;
    for (index, file) in files.iter().enumerate() {
        progress::tick(progress, index + 1, &file.path);
        if file.is_empty() && recorder.delete(&file.path, 0, Category::Empty) {
            deleted += 1;
        }
    }
    deleted
}
