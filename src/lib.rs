//! filemop - directory cleanup utility
//!
//! Removes duplicate files (BLAKE3 content digest, first occurrence wins),
//! zero-byte files and files that fail a format check, then moves every
//! remaining file into a folder named after its extension. Each action is
//! appended to an action log.
//!
//! The library entry point is [`pipeline::Orchestrator`]; [`run`] is a
//! shortcut that keeps the action log in memory. [`run_app`] drives the
//! command-line interface.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod integrity;
pub mod journal;
pub mod logging;
pub mod organizer;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod scanner;
pub mod signal;
pub mod sweep;

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::cli::{Cli, Commands, LogArgs, OutputFormat, RunArgs, TreeArgs};
use crate::config::Config;
use crate::error::{CleanError, ExitCode};
use crate::journal::{CsvSink, MemorySink, Tee};
use crate::output::{JsonOutput, TreeOptions};
use crate::pipeline::{Orchestrator, RunResult};
use crate::progress::Progress;

pub use crate::pipeline::run;

/// Run the command described by `cli`.
///
/// Logging must already be initialized.
///
/// # Errors
///
/// Returns an error for an invalid target ([`CleanError`]), an unreadable
/// configuration or log file, or a failure writing to stdout.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Run(ref args) => {
            config.merge_run_args(args);
            run_command(args, config, cli.quiet)
        }
        Commands::Tree(ref args) => tree_command(args),
        Commands::Config => {
            print!("{}", config.to_toml().context("Failed to render config")?);
            Ok(ExitCode::Success)
        }
        Commands::Log(ref args) => log_command(args, &config),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => {
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            Config::try_load(Some(path))
                .with_context(|| format!("Invalid config file {}", path.display()))
        }
        None => Ok(Config::load(None)),
    }
}

fn run_command(args: &RunArgs, config: Config, quiet: bool) -> Result<ExitCode> {
    // An invalid target must not leave a log file behind
    pipeline::resolve_root(&args.path)?;

    let csv = match &config.log_file {
        Some(path) => Some(
            CsvSink::open(path)
                .with_context(|| format!("Failed to open action log {}", path.display()))?,
        ),
        None => None,
    };

    let mut orchestrator = Orchestrator::new(config, Tee::new(csv, MemorySink::new()));
    if !quiet && args.output == OutputFormat::Text {
        orchestrator = orchestrator.with_progress(Arc::new(Progress::new(false)));
    }

    let shutdown = match args.every {
        Some(_) => Some(signal::install_handler()?),
        None => None,
    };

    loop {
        let result = orchestrator.run(&args.path)?;
        let actions = std::mem::take(&mut orchestrator.sink_mut().second).into_entries();
        report(args, &result, &actions, quiet)?;

        let (Some(secs), Some(handler)) = (args.every, &shutdown) else {
            return Ok(result.exit_code());
        };
        log::info!("Next run in {}s (Ctrl+C to stop)", secs);
        if !handler.sleep(Duration::from_secs(secs)) {
            return Ok(ExitCode::Interrupted);
        }
    }
}

fn report(
    args: &RunArgs,
    result: &RunResult,
    actions: &[journal::LogEntry],
    quiet: bool,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.output {
        OutputFormat::Json => JsonOutput::new(result, actions).write_to(&mut out, true)?,
        OutputFormat::Text if !quiet => output::write_summary(&mut out, result)?,
        OutputFormat::Text => {}
    }

    if args.show_tree {
        output::write_tree(&mut out, &result.root, TreeOptions::default())?;
    }
    out.flush()?;
    Ok(())
}

fn tree_command(args: &TreeArgs) -> Result<ExitCode> {
    if !args.path.exists() {
        return Err(CleanError::NotFound(args.path.clone()).into());
    }
    if !args.path.is_dir() {
        return Err(CleanError::NotADirectory(args.path.clone()).into());
    }

    let options = TreeOptions {
        show_root_files: args.all,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write_tree(&mut out, &args.path, options)?;
    Ok(ExitCode::Success)
}

fn log_command(args: &LogArgs, config: &Config) -> Result<ExitCode> {
    let Some(path) = args.file.as_ref().or(config.log_file.as_ref()) else {
        bail!("No log file configured; pass --file");
    };

    let rows = journal::read_log(path)
        .with_context(|| format!("Failed to read action log {}", path.display()))?;
    let skip = args
        .tail
        .map_or(0, |tail| rows.len().saturating_sub(tail));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for row in &rows[skip..] {
        writeln!(
            out,
            "{}  {:<7}  {:<10}  {}",
            row.timestamp, row.action, row.category, row.path
        )?;
    }
    Ok(ExitCode::Success)
}
