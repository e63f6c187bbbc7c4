//! Directory tree rendering.
//!
//! ```text
//! ├── 📁 pdf/
//! │   └── 📄 report.pdf (12.3 KiB)
//! └── 📁 txt/
//!     └── 📄 notes.txt (120 B)
//! ```
//!
//! Directories come before files, each sorted by name. Hidden entries are
//! skipped. At the root only directories are listed unless
//! [`TreeOptions::show_root_files`] is set; after an organize run the root
//! holds the extension folders plus the files that have no extension.

use std::io::{self, Write};
use std::path::Path;

use bytesize::ByteSize;
use walkdir::WalkDir;

/// Rendering options.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOptions {
    /// List files directly under the root too.
    pub show_root_files: bool,
}

/// Render the tree under `root` as lines.
///
/// Unreadable directories render as a `❌` leaf instead of failing.
#[must_use]
pub fn render_tree(root: &Path, options: TreeOptions) -> Vec<String> {
    let mut lines = Vec::new();
    render_dir(root, "", options.show_root_files, &mut lines);
    lines
}

/// Write the tree under `root`, one line per entry.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_tree<W: Write>(writer: &mut W, root: &Path, options: TreeOptions) -> io::Result<()> {
    writeln!(writer, "{}", root.display())?;
    for line in render_tree(root, options) {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

struct Child {
    name: String,
    is_dir: bool,
    size: u64,
}

fn render_dir(dir: &Path, prefix: &str, show_files: bool, lines: &mut Vec<String>) {
    let children = match list_children(dir) {
        Ok(children) => children,
        Err(e) => {
            log::debug!("Cannot list {}: {}", dir.display(), e);
            let reason = match e.io_error().map(io::Error::kind) {
                Some(io::ErrorKind::PermissionDenied) => "Permission denied",
                _ => "Unreadable",
            };
            lines.push(format!("{prefix}└── ❌ {reason}"));
            return;
        }
    };

    let shown: Vec<&Child> = children
        .iter()
        .filter(|child| child.is_dir || show_files)
        .collect();

    for (index, child) in shown.iter().enumerate() {
        let last = index + 1 == shown.len();
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };

        if child.is_dir {
            lines.push(format!("{prefix}{branch}📁 {}/", child.name));
            let next_prefix = format!("{prefix}{indent}");
            render_dir(&dir.join(&child.name), &next_prefix, true, lines);
        } else {
            lines.push(format!(
                "{prefix}{branch}📄 {} ({})",
                child.name,
                ByteSize::b(child.size)
            ));
        }
    }
}

/// Visible children of `dir`: directories first, then files, each by name.
fn list_children(dir: &Path) -> Result<Vec<Child>, walkdir::Error> {
    let mut children = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by(|a, b| {
            b.file_type()
                .is_dir()
                .cmp(&a.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let is_dir = entry.file_type().is_dir();
        if !is_dir && !entry.file_type().is_file() {
            continue;
        }
        let size = if is_dir {
            0
        } else {
            entry.metadata().map(|m| m.len()).unwrap_or(0)
        };
        children.push(Child { name, is_dir, size });
    }
    Ok(children)
}
