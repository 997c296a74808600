//! Configuration merger for CLI arguments and config files
//!
//! Loads file/env configuration through [`ConfigLoader`] and applies CLI
//! overrides on top. CLI arguments always win.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, Settings};

/// Applies CLI overrides to file-based configuration
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration.
    ///
    /// `config_path` switches the loader to single-file mode; `environment`
    /// replaces the one detected from `RELAY_APP_ENV`.
    ///
    /// # Errors
    /// Returns ConfigError if configuration loading or validation fails
    pub fn load(
        config_path: Option<&Path>,
        environment: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(path) = config_path {
            loader = loader.with_config_file(path);
        }
        if let Some(environment) = environment {
            loader = loader.with_environment(environment);
        }

        tracing::debug!(
            environment = %loader.environment(),
            config_dir = %loader.config_dir().display(),
            "Loading configuration"
        );

        Ok(Self::new(loader.load()?))
    }

    /// Merge CLI arguments with the base configuration
    ///
    /// Global `--verbose`/`--quiet` are applied first, then the command's
    /// own flags, so `serve --log-level` beats both. The result is validated
    /// again because overrides can introduce invalid values.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = (*level).into();
            }
        }

        config.validate()?;

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
