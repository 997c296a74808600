//! CLI module for push-relay
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command execution for serve, send and receive

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use std::ffi::OsString;

use clap::Parser;
use clap::error::ErrorKind;

use crate::config::Settings;
use crate::logger::init_logger;

/// Process exit status for a completed command
pub const EXIT_SUCCESS: u8 = 0;
/// Process exit status for usage, configuration, credential or I/O errors
pub const EXIT_FAILURE: u8 = 1;

/// Parse command-line arguments.
///
/// On failure clap's message is printed and the exit status is returned:
/// `--help` and `--version` exit successfully, anything else fails.
pub fn parse_args<I, T>(args: I) -> Result<Cli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| {
        let _ = e.print();
        match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
            _ => EXIT_FAILURE,
        }
    })
}

/// Run the selected command and map its outcome to an exit status
pub async fn run_command(cli: &Cli, settings: Settings) -> u8 {
    match execute_command(cli, settings).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "push-relay exited with an error");
            eprintln!("Error: {:#}", e);
            EXIT_FAILURE
        }
    }
}

/// Load and merge configuration from CLI arguments
///
/// 1. Load base configuration from files and `RELAY_*` variables
/// 2. Merge CLI argument overrides
/// 3. Validate the final configuration
///
/// # Errors
/// Returns error if configuration loading, merging, or validation fails
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::load(cli.config.as_deref(), cli.env.map(Into::into))
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    merger
        .merge_cli_args(cli)
        .map_err(|e| anyhow::anyhow!("Configuration merge error: {}", e))
}

/// Initialize logger from settings
///
/// # Errors
/// Returns error if the logger configuration is invalid or a global
/// subscriber is already installed
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .map_err(|e| anyhow::anyhow!("Logger configuration error: {}", e))?;

    init_logger(logger_config).map_err(|e| anyhow::anyhow!("Logger initialization error: {}", e))
}
