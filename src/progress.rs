//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`Progress`] struct which implements
//! [`ProgressCallback`] to display one progress bar per pipeline stage.
//! Stages run one after another, so only one bar is ever active.

use std::path::Path;
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

use crate::pipeline::Stage;

/// Progress callback for pipeline stages.
///
/// Implement this trait to receive progress updates during a run.
pub trait ProgressCallback: Send + Sync {
    /// Called when a stage starts.
    ///
    /// # Arguments
    ///
    /// * `stage` - The stage about to run
    /// * `total` - Number of files in the stage's snapshot
    fn on_stage_start(&self, stage: Stage, total: usize);

    /// Called for each file processed.
    ///
    /// # Arguments
    ///
    /// * `current` - Current item number (1-based)
    /// * `path` - Path being processed
    fn on_progress(&self, current: usize, path: &Path);

    /// Called when a stage completes.
    fn on_stage_end(&self, stage: Stage);
}

/// Forward a per-file tick to an optional callback.
pub(crate) fn tick(progress: Option<&dyn ProgressCallback>, current: usize, path: &Path) {
    if let Some(callback) = progress {
        callback.on_progress(current, path);
    }
}

/// Progress reporter using indicatif.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bars will be displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use filemop::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }
}

impl ProgressCallback for Progress {
    fn on_stage_start(&self, stage: Stage, total: usize) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::style());
        pb.set_message(stage.label());
        if let Ok(mut bar) = self.bar.lock() {
            if let Some(previous) = bar.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn on_progress(&self, current: usize, path: &Path) {
        if self.quiet {
            return;
        }

        if let Ok(bar) = self.bar.lock() {
            if let Some(ref pb) = *bar {
                pb.set_position(current as u64);
                pb.set_message(truncate_path(&path.to_string_lossy(), 30));
            }
        }
    }

    fn on_stage_end(&self, stage: Stage) {
        if self.quiet {
            return;
        }

        if let Ok(mut bar) = self.bar.lock() {
            if let Some(pb) = bar.take() {
                pb.finish_with_message(format!("{} complete", stage.label()));
            }
        }
    }
}

/// Truncate a path for display in the progress bar.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.len() <= max_len {
        return path.to_string();
    }

    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if file_name.len() >= max_len {
        let tail: String = file_name
            .chars()
            .rev()
            .take(max_len.saturating_sub(3))
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        return format!("...{tail}");
    }

    format!(".../{file_name}")
}
