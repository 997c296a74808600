//! Server module for managing HTTP server lifecycle
//!
//! This module handles provider initialization, server startup, and graceful shutdown.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Environment, Settings};
use crate::external::fcm::FcmProvider;
use crate::receiver::WORKER_SCRIPT_PATH;
use crate::services::PushProvider;
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
    environment: Environment,
}

impl Server {
    pub fn new(settings: Settings, environment: Environment) -> Self {
        Self {
            settings,
            environment,
        }
    }

    /// Start the server and run until shutdown signal
    ///
    /// This method:
    /// 1. Logs startup information
    /// 2. Loads the service-account key and builds the FCM provider
    /// 3. Creates application state and router
    /// 4. Binds to configured address
    /// 5. Serves with graceful shutdown
    ///
    /// # Errors
    /// - Credential loading or key parsing errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %self.environment,
            "Application starting"
        );

        let provider = FcmProvider::from_config(&self.settings.fcm).map_err(|e| {
            tracing::error!(error = %e, "Failed to initialize push provider");
            anyhow::anyhow!("Failed to initialize push provider: {}", e)
        })?;

        tracing::info!(
            project_id = %provider.project_id(),
            credential_source = %provider.credential_source(),
            validate_only = self.settings.fcm.validate_only,
            "Push provider initialized"
        );

        self.run_with_provider(Arc::new(provider)).await
    }

    /// Serves with an already constructed provider
    pub async fn run_with_provider(self, provider: Arc<dyn PushProvider>) -> anyhow::Result<()> {
        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            cors_enabled = self.settings.server.cors_enabled,
            "Server configuration loaded"
        );

        tracing::info!(
            level = %self.settings.logger.level,
            console_enabled = %self.settings.logger.console.enabled,
            file_enabled = %self.settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        if self.settings.worker.is_configured() {
            tracing::info!(path = WORKER_SCRIPT_PATH, "Worker script enabled");
        } else {
            tracing::warn!(
                path = WORKER_SCRIPT_PATH,
                "Worker identifiers are not configured; the served worker script cannot initialize messaging"
            );
        }

        let state = AppState::new(&self.settings, provider);
        let router = create_router(state, self.settings.server.cors_enabled);
        tracing::info!("Router configured");

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// A handler that cannot be installed is logged and never fires; the other
/// signal still works.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
