//! Command-line interface definitions for filemop.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options (verbosity, config file, JSON errors) apply to every subcommand.
//!
//! # Example
//!
//! ```bash
//! # Clean a directory once, appending actions to the default CSV log
//! filemop run ~/Downloads
//!
//! # Clean every hour until Ctrl+C, without writing a log file
//! filemop run ~/Downloads --every 3600 --no-log-file
//!
//! # JSON summary for scripting
//! filemop run ~/Downloads --output json
//!
//! # Show the resulting tree
//! filemop tree ~/Downloads
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::actions::CollisionPolicy;

/// Directory cleanup utility.
///
/// filemop removes duplicate files (BLAKE3 content digest), empty files and
/// files that fail a format check, then moves every remaining file into a
/// folder named after its extension. Every action is appended to a CSV log.
#[derive(Debug, Parser)]
#[command(name = "filemop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (default: platform config dir, config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for filemop.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clean a directory: duplicates, empty files, corrupted files, then sort by extension
    Run(RunArgs),
    /// Print a directory tree with file sizes
    Tree(TreeArgs),
    /// Print the effective configuration as TOML
    Config,
    /// Print rows of a CSV action log
    Log(LogArgs),
}

/// Arguments for the run subcommand.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Directory to clean
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// CSV file that receives one row per action
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Do not write a CSV action log
    #[arg(long, conflicts_with = "log_file")]
    pub no_log_file: bool,

    /// Summary format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Read block size for hashing (e.g., 64KiB, 1MiB)
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub block_size: Option<u64>,

    /// Hash in 1 KiB blocks
    #[arg(long, conflicts_with = "block_size")]
    pub legacy_block_size: bool,

    /// What to do when a file's destination name is taken
    #[arg(long, value_enum, value_name = "POLICY")]
    pub collision: Option<CollisionPolicy>,

    /// Delete files that cannot be read, as if they were corrupted
    #[arg(long)]
    pub delete_unreadable: bool,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Follow symbolic links
    ///
    /// Warning: May cause infinite loops if symlinks form cycles.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Repeat the run every SECS seconds until interrupted
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub every: Option<u64>,

    /// Print the directory tree after each run
    #[arg(long)]
    pub show_tree: bool,
}

/// Arguments for the tree subcommand.
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Directory to display
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Also list files directly under the root
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for the log subcommand.
#[derive(Debug, Args)]
pub struct LogArgs {
    /// Log file to read (default: the configured log file)
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Only print the last N rows
    #[arg(long, value_name = "N")]
    pub tail: Option<usize>,
}

/// Output format for run summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use filemop::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("64KiB").unwrap(), 65_536);
/// assert_eq!(parse_size("1MiB").unwrap(), 1_048_576);
/// ```
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// a negative number, or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    // Find where the number ends and the suffix begins
    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    if num < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}
