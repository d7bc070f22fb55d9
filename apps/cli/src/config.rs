//! # Configuration
//!
//! Command line arguments and the optional TOML config file.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Command line flags / environment (--db, STOCKROOM_DB_PATH)          │
//! │  2. Config file (--config stockroom.toml)                               │
//! │  3. Defaults (inventory.db in the working directory)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! database_path = "/var/lib/stockroom/inventory.db"
//! log_filter = "info"
//! ```
//!
//! `RUST_LOG`, when set, wins over every log setting here.

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Database file used when nothing else is configured.
pub const DEFAULT_DATABASE_PATH: &str = "inventory.db";

/// Log filter used when nothing else is configured. Quiet so log lines
/// don't interleave with the menu.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Log filter selected by `--verbose`.
pub const VERBOSE_LOG_FILTER: &str = "debug,sqlx=warn";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "stockroom",
    version,
    about = "Single-user inventory tracker backed by SQLite"
)]
pub struct Args {
    /// Path to a TOML config file (database_path, log_filter).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// SQLite database file (created if missing).
    #[arg(long = "db", env = "STOCKROOM_DB_PATH", value_name = "PATH")]
    pub database_path: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What to do once the database is open.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    /// Interactive numbered menu (the default).
    #[default]
    Menu,

    /// Print products at or below a quantity threshold, then exit.
    LowStock {
        /// Quantity boundary (inclusive).
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: i64,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print all stock transactions, newest first, then exit.
    Transactions {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub database_path: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl FileConfig {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ─── Resolved config ──────────────────────────────────────────────────────────

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_filter: String,
    pub command: Command,
}

impl AppConfig {
    /// Loads the config file named in `args` (if any) and merges it.
    pub fn load(args: Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(AppConfig::merge(args, file))
    }

    /// CLI flags override the config file, which overrides defaults.
    pub fn merge(args: Args, file: FileConfig) -> Self {
        let database_path = args
            .database_path
            .or(file.database_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let log_filter = if args.verbose {
            VERBOSE_LOG_FILTER.to_string()
        } else {
            file.log_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
        };

        AppConfig {
            database_path,
            log_filter,
            command: args.command.unwrap_or_default(),
        }
    }
}
