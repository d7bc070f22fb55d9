//! # Stockroom Entry Point
//!
//! ```text
//! stockroom [--db PATH] [--config FILE] [--verbose] [COMMAND]
//!
//!   menu                                 interactive menu (default)
//!   low-stock --threshold N [--json]     products at or below N
//!   transactions [--json]                every movement, newest first
//! ```
//!
//! Exit codes: 0 on success, 1 when a command was rejected or startup
//! failed.

use std::process::ExitCode;

use clap::Parser;

use stockroom_cli::config::{AppConfig, Args};
use stockroom_cli::Outcome;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let config = AppConfig::load(Args::parse())?;

    match stockroom_cli::run(config).await? {
        Outcome::Success => Ok(ExitCode::SUCCESS),
        Outcome::Rejected => Ok(ExitCode::FAILURE),
    }
}
