//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. built-in defaults
//! 2. a TOML file (`--config`, or `config.toml` in the platform config dir)
//! 3. `FILEMOP_*` environment variables (e.g. `FILEMOP_SKIP_HIDDEN=true`)
//! 4. command-line flags ([`Config::merge_run_args`])

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::actions::CollisionPolicy;
use crate::cli::RunArgs;
use crate::integrity::UnreadablePolicy;
use crate::scanner::{Hasher, WalkerConfig, DEFAULT_BLOCK_SIZE, LEGACY_BLOCK_SIZE};

/// Default name of the CSV action log, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "file_management_log.csv";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FILEMOP_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Read block size for hashing, in bytes.
    pub hash_block_size: usize,
    /// CSV action log; `None` disables the file log.
    pub log_file: Option<PathBuf>,
    /// What the organizer does when a destination name is taken.
    pub collision: CollisionPolicy,
    /// What the integrity stage does with unreadable files.
    pub unreadable: UnreadablePolicy,
    /// Skip hidden files and directories.
    pub skip_hidden: bool,
    /// Follow symbolic links.
    pub follow_symlinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hash_block_size: DEFAULT_BLOCK_SIZE,
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            collision: CollisionPolicy::Skip,
            unreadable: UnreadablePolicy::Report,
            skip_hidden: false,
            follow_symlinks: false,
        }
    }
}

impl Config {
    /// Load from `path` (or the default location), falling back to defaults
    /// when the file is missing or invalid.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load from `path` (or the default location).
    ///
    /// A missing file is not an error; the file layer is simply absent.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] when the file or an environment variable
    /// holds an invalid value.
    pub fn try_load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);
        Self::figment(path.as_deref()).extract()
    }

    /// The full provider stack, without CLI flags.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            log::debug!("Config file: {}", path.display());
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "filemop", "filemop")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply `run` flags on top of the loaded layers.
    pub fn merge_run_args(&mut self, args: &RunArgs) {
        if args.legacy_block_size {
            self.hash_block_size = LEGACY_BLOCK_SIZE;
        } else if let Some(size) = args.block_size {
            self.hash_block_size = usize::try_from(size).unwrap_or(usize::MAX);
        }

        if args.no_log_file {
            self.log_file = None;
        } else if let Some(ref log_file) = args.log_file {
            self.log_file = Some(log_file.clone());
        }

        if let Some(collision) = args.collision {
            self.collision = collision;
        }
        if args.delete_unreadable {
            self.unreadable = UnreadablePolicy::Delete;
        }
        if args.skip_hidden {
            self.skip_hidden = true;
        }
        if args.follow_symlinks {
            self.follow_symlinks = true;
        }
    }

    /// Hasher configured with the block size.
    #[must_use]
    pub fn hasher(&self) -> Hasher {
        Hasher::with_block_size(self.hash_block_size)
    }

    /// Walker settings for this configuration.
    #[must_use]
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig::new(self.follow_symlinks, self.skip_hidden)
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns a serialization error (not expected for this type).
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
