//! The cleaning pipeline.
//!
//! [`Orchestrator::run`] validates the target, then runs four stages over
//! the same tree, each on a fresh walk so it sees what earlier stages did:
//!
//! 1. [`Stage::Duplicates`]: keep the first copy of every content digest
//! 2. [`Stage::Empty`]: delete zero-byte files
//! 3. [`Stage::Integrity`]: delete files that fail their format check
//! 4. [`Stage::Organize`]: move files into `<root>/<ext>/`
//!
//! Nothing is rolled back across stages. Per-file failures are collected in
//! the [`RunResult`]; only an invalid target stops a run, and it does so
//! before anything is touched.
//!
//! # Example
//!
//! ```no_run
//! use filemop::config::Config;
//! use filemop::journal::MemorySink;
//! use filemop::pipeline::Orchestrator;
//! use std::path::Path;
//!
//! let mut orchestrator = Orchestrator::new(Config::default(), MemorySink::new());
//! let result = orchestrator.run(Path::new("/srv/inbox")).unwrap();
//! println!("{} files moved", result.counts.moved);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::actions::Recorder;
use crate::config::Config;
use crate::duplicates::{remove_redundant, DuplicateFinder};
use crate::error::{CleanError, ExitCode, FileError};
use crate::integrity::Validator;
use crate::journal::{ActionSink, LogEntry, MemorySink};
use crate::organizer::Organizer;
use crate::progress::ProgressCallback;
use crate::scanner::{FileRecord, ScanError, Walker, WalkerConfig};
use crate::sweep::sweep_empty;

/// A pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Duplicate removal
    Duplicates,
    /// Empty-file removal
    Empty,
    /// Corrupted-file removal
    Integrity,
    /// Extension-based reorganization
    Organize,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 4] = [
        Stage::Duplicates,
        Stage::Empty,
        Stage::Integrity,
        Stage::Organize,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Duplicates => "Removing duplicates",
            Self::Empty => "Removing empty files",
            Self::Integrity => "Checking file integrity",
            Self::Organize => "Organizing by extension",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-stage action counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunCounts {
    /// Redundant copies deleted
    pub duplicates_deleted: usize,
    /// Zero-byte files deleted
    pub empty_deleted: usize,
    /// Corrupted files deleted
    pub corrupted_deleted: usize,
    /// Files moved into extension folders
    pub moved: usize,
}

impl RunCounts {
    /// Total files deleted by all stages.
    #[must_use]
    pub fn deleted(&self) -> usize {
        self.duplicates_deleted + self.empty_deleted + self.corrupted_deleted
    }

    /// Total actions taken.
    #[must_use]
    pub fn total(&self) -> usize {
        self.deleted() + self.moved
    }
}

/// Outcome of one run.
#[derive(Debug)]
pub struct RunResult {
    /// Canonical target directory
    pub root: PathBuf,
    /// What each stage did
    pub counts: RunCounts,
    /// Non-fatal per-file failures
    pub errors: Vec<FileError>,
    /// Wall-clock time of the run
    pub duration: Duration,
}

impl RunResult {
    /// Exit code for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        if self.errors.is_empty() {
            ExitCode::Success
        } else {
            ExitCode::PartialSuccess
        }
    }
}

/// Runs the four stages over a target directory.
pub struct Orchestrator<S: ActionSink> {
    config: Config,
    sink: S,
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl<S: ActionSink> Orchestrator<S> {
    /// Create an orchestrator that records actions to `sink`.
    #[must_use]
    pub fn new(config: Config, sink: S) -> Self {
        Self {
            config,
            sink,
            progress: None,
        }
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The action sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the action sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the orchestrator, returning the sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Clean `root`.
    ///
    /// # Errors
    ///
    /// [`CleanError::NotFound`] or [`CleanError::NotADirectory`] when the
    /// target is invalid, [`CleanError::Io`] when it cannot be resolved. No
    /// file is touched in either case.
    pub fn run(&mut self, root: &Path) -> Result<RunResult, CleanError> {
        let start = Instant::now();
        let root = resolve_root(root)?;

        let mut walker_config = self.config.walker_config();
        if let Some(location) = self.sink.location() {
            walker_config = walker_config.with_excluded(location.to_path_buf());
        }

        log::info!("Cleaning {}", root.display());

        let progress = self.progress.clone();
        let progress = progress.as_deref();
        let mut walk_errors = WalkErrors::default();
        let mut counts = RunCounts::default();
        let mut recorder = Recorder::new(&mut self.sink);

        // Duplicates
        let files = walk_errors.snapshot(&root, &walker_config);
        begin(progress, Stage::Duplicates, files.len());
        let mut finder = DuplicateFinder::new(self.config.hasher());
        if let Some(callback) = &self.progress {
            finder = finder.with_progress(Arc::clone(callback));
        }
        let (groups, hash_errors) = finder.group_files(files);
        for error in hash_errors {
            recorder.report(error);
        }
        counts.duplicates_deleted = remove_redundant(&groups, &mut recorder);
        end(progress, Stage::Duplicates, counts.duplicates_deleted);

        // Empty files
        let files = walk_errors.snapshot(&root, &walker_config);
        begin(progress, Stage::Empty, files.len());
        counts.empty_deleted = sweep_empty(&files, &mut recorder, progress);
        end(progress, Stage::Empty, counts.empty_deleted);

        // Corrupted files
        let files = walk_errors.snapshot(&root, &walker_config);
        begin(progress, Stage::Integrity, files.len());
        let validator = Validator::new(self.config.unreadable);
        counts.corrupted_deleted = validator.validate(&files, &mut recorder, progress);
        end(progress, Stage::Integrity, counts.corrupted_deleted);

        // Organize
        let files = walk_errors.snapshot(&root, &walker_config);
        begin(progress, Stage::Organize, files.len());
        let organizer = Organizer::new(&root, self.config.collision);
        counts.moved = organizer.organize(&files, &mut recorder, progress);
        end(progress, Stage::Organize, counts.moved);

        let mut errors = walk_errors.into_errors();
        errors.extend(recorder.into_errors());

        let duration = start.elapsed();
        log::info!(
            "Done in {:.2?}: {} deleted, {} moved, {} errors",
            duration,
            counts.deleted(),
            counts.moved,
            errors.len()
        );

        Ok(RunResult {
            root,
            counts,
            errors,
            duration,
        })
    }
}

/// Clean `root` with an in-memory action log.
///
/// Returns the run result and the recorded actions.
///
/// # Errors
///
/// See [`Orchestrator::run`].
pub fn run(root: &Path, config: &Config) -> Result<(RunResult, Vec<LogEntry>), CleanError> {
    let mut orchestrator = Orchestrator::new(config.clone(), MemorySink::new());
    let result = orchestrator.run(root)?;
    Ok((result, orchestrator.into_sink().into_entries()))
}

/// Check that `root` is an existing directory and canonicalize it.
///
/// Touches nothing on disk.
///
/// # Errors
///
/// [`CleanError::NotFound`], [`CleanError::NotADirectory`], or
/// [`CleanError::Io`] when the path cannot be inspected.
pub fn resolve_root(root: &Path) -> Result<PathBuf, CleanError> {
    let metadata = fs::metadata(root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CleanError::NotFound(root.to_path_buf()),
        _ => CleanError::Io {
            path: root.to_path_buf(),
            source: e,
        },
    })?;
    if !metadata.is_dir() {
        return Err(CleanError::NotADirectory(root.to_path_buf()));
    }
    fs::canonicalize(root).map_err(|e| CleanError::Io {
        path: root.to_path_buf(),
        source: e,
    })
}

fn begin(progress: Option<&dyn ProgressCallback>, stage: Stage, total: usize) {
    log::info!("{} ({} files)", stage, total);
    if let Some(callback) = progress {
        callback.on_stage_start(stage, total);
    }
}

fn end(progress: Option<&dyn ProgressCallback>, stage: Stage, affected: usize) {
    log::debug!("{}: {} files affected", stage, affected);
    if let Some(callback) = progress {
        callback.on_stage_end(stage);
    }
}

/// Walk errors across the four snapshots of a run.
///
/// An unreadable directory shows up in every walk; it is reported once.
#[derive(Default)]
struct WalkErrors {
    seen: HashSet<PathBuf>,
    errors: Vec<FileError>,
}

impl WalkErrors {
    fn snapshot(&mut self, root: &Path, config: &WalkerConfig) -> Vec<FileRecord> {
        let (files, errors) = Walker::new(root, config.clone()).collect_files();
        for error in errors {
            self.push(error);
        }
        files
    }

    fn push(&mut self, error: ScanError) {
        if self.seen.insert(error.path().to_path_buf()) {
            self.errors.push(FileError::from(error));
        }
    }

    fn into_errors(self) -> Vec<FileError> {
        self.errors
    }
}
