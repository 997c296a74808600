//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{SendCommandHandler, ServeCommandHandler, run_receive};
use super::parser::{Cli, Commands};
use crate::config::{Environment, Settings};
use crate::error::{AppError, AppResult};

/// Execute a CLI command with the given settings
///
/// No subcommand means `serve` without overrides.
///
/// # Errors
/// Returns errors from command handlers or argument validation
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    let environment = cli
        .env
        .map(Environment::from)
        .unwrap_or_else(Environment::from_env);

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings, environment)
                .execute(*dry_run)
                .await
        }
        None => ServeCommandHandler::new(settings, environment).execute(false).await,
        Some(Commands::Send { args }) => SendCommandHandler::new(settings).execute(args).await,
        Some(Commands::Receive { input, print_only }) => {
            run_receive(&settings, input.clone(), *print_only).await?;
            Ok(())
        }
    }
}
