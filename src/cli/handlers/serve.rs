//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::{Environment, Settings};
use crate::error::AppResult;
use crate::external::fcm::FcmProvider;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Execute the serve command with optional dry-run support
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Credential loading errors
    /// - Server startup errors (if not dry-run)
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config, self.environment).run().await?;
        Ok(())
    }

    /// Validate configuration and credentials without starting the server.
    ///
    /// Parses the service-account key but makes no network calls.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        println!("✓ Configuration is valid ({})", self.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());

        let provider = FcmProvider::from_config(&self.config.fcm)?;
        println!(
            "✓ Service account loaded from {} (project {})",
            provider.credential_source(),
            provider.project_id()
        );

        if self.config.worker.is_configured() {
            println!("✓ Worker script is configured");
        } else {
            println!("! Worker identifiers are missing; the worker script will not initialize");
        }

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }
}
