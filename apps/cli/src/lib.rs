//! # Stockroom CLI Library
//!
//! Everything behind the `stockroom` binary. `main.rs` only parses
//! arguments and hands off to [`run`].
//!
//! ## Module Organization
//! ```text
//! stockroom_cli/
//! ├── lib.rs          ◄─── You are here (startup & logging)
//! ├── config.rs       ◄─── clap args + TOML config file
//! ├── commands.rs     ◄─── Command dispatch, one-shot reports
//! ├── menu.rs         ◄─── Interactive numbered menu
//! ├── prompt.rs       ◄─── Line prompts with retry
//! ├── render.rs       ◄─── Text / JSON output
//! └── error.rs        ◄─── User-facing error type
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod menu;
pub mod prompt;
pub mod render;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::CommandError;
use config::{AppConfig, Command};
use error::CliError;
use stockroom_db::{Database, DbConfig};

/// How a run ended, for the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The requested operation was rejected; the reason was printed.
    Rejected,
}

/// Runs the application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber to stderr                                      │
/// │     • RUST_LOG > --verbose > config file > "warn"                       │
/// │                                                                         │
/// │  2. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite file, created if missing                                   │
/// │     • Run pending migrations                                            │
/// │                                                                         │
/// │  3. Dispatch ─────────────────────────────────────────────────────────► │
/// │     • menu (default), low-stock, transactions                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Errors
/// Returns an error when the database cannot be opened or migrated, or the
/// terminal fails. Rejected operations are printed and reported as
/// [`Outcome::Rejected`] instead.
pub async fn run(config: AppConfig) -> anyhow::Result<Outcome> {
    init_tracing(&config.log_filter);

    info!(path = %config.database_path.display(), "Opening database");

    let db = Database::new(DbConfig::new(&config.database_path))
        .await
        .with_context(|| {
            format!(
                "failed to open database {}",
                config.database_path.display()
            )
        })?;

    let result = commands::execute(&db, &config.command).await;
    db.close().await;

    match result {
        Ok(()) => Ok(Outcome::Success),
        Err(CommandError::Cli(err)) => {
            report_rejection(&config.command, &err)?;
            Ok(Outcome::Rejected)
        }
        Err(err) => Err(err.into()),
    }
}

/// Prints a rejected one-shot command: JSON on stdout for `--json`,
/// otherwise a warning line on stderr.
fn report_rejection(command: &Command, err: &CliError) -> anyhow::Result<()> {
    let json = matches!(
        command,
        Command::LowStock { json: true, .. } | Command::Transactions { json: true }
    );

    if json {
        print!("{}", render::json(err)?);
    } else {
        eprintln!("⚠ {err}");
    }
    Ok(())
}

/// Initializes the tracing subscriber on stderr.
///
/// `RUST_LOG` overrides `default_filter` when set.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
