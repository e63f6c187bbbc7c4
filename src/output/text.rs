//! Plain-text run summary.

use std::io::{self, Write};

use crate::pipeline::RunResult;

/// Write a human-readable summary of `result`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_summary<W: Write>(writer: &mut W, result: &RunResult) -> io::Result<()> {
    let counts = &result.counts;
    writeln!(writer, "Cleaned {}", result.root.display())?;
    writeln!(writer, "  Duplicates deleted: {}", counts.duplicates_deleted)?;
    writeln!(writer, "  Empty files deleted: {}", counts.empty_deleted)?;
    writeln!(writer, "  Corrupted files deleted: {}", counts.corrupted_deleted)?;
    writeln!(writer, "  Files moved: {}", counts.moved)?;
    writeln!(writer, "  Duration: {:.2?}", result.duration)?;

    if !result.errors.is_empty() {
        writeln!(writer, "{} files could not be processed:", result.errors.len())?;
        for error in &result.errors {
            writeln!(writer, "  - {error}")?;
        }
    }
    Ok(())
}
