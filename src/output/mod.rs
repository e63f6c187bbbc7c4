//! Output formatters.
//!
//! - [`text`]: human-readable run summary
//! - [`json`]: machine-readable run summary with actions and errors
//! - [`tree`]: directory tree with file sizes

pub mod json;
pub mod text;
pub mod tree;

// Re-export main types
pub use json::JsonOutput;
pub use text::write_summary;
pub use tree::{render_tree, write_tree, TreeOptions};
