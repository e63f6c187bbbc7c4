//! Files shared by the integration tests.

use std::fs;
use std::path::{Path, PathBuf};

// Same builders the unit tests use
#[path = "../../src/integrity/fixtures.rs"]
#[allow(dead_code)]
mod samples;

pub use samples::{cjk_pdf, minimal_pdf, small_image, small_png, IMAGE_FORMATS};

/// Write `content` to `root/rel`, creating parent directories.
pub fn write(root: &Path, rel: &str, content: &[u8]) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Every regular file under `root`, relative and sorted.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
