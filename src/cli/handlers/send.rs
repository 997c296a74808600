//! Send command handler
//!
//! The command-line adapter of the dispatch operation.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::external::fcm::FcmProvider;
use crate::models::NotificationRequest;
use crate::services::{DispatchService, PushProvider};

/// Printed to stderr whenever the arguments are unusable
pub const SEND_USAGE: &str = "Usage: push-relay send <token> <title> <body>";

/// Handler for the send command
pub struct SendCommandHandler {
    config: Settings,
}

impl SendCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validates the arguments, loads credentials and sends once.
    ///
    /// Arguments are checked before credentials are touched, so a usage
    /// error never needs a service-account key.
    ///
    /// # Errors
    /// - Wrong argument count or an empty argument (usage printed to stderr)
    /// - Credentials that cannot be loaded
    ///
    /// A provider failure is not an error here: it is logged and the command
    /// still succeeds.
    pub async fn execute(&self, args: &[String]) -> AppResult<()> {
        let request = parse_args(args)?;

        let provider = FcmProvider::from_config(&self.config.fcm).inspect_err(|e| {
            tracing::error!(error = %e, "Failed to initialize push provider");
        })?;

        deliver(Arc::new(provider), &request).await
    }

    /// Same as [`execute`](Self::execute) with an already built provider.
    pub async fn execute_with(
        &self,
        provider: Arc<dyn PushProvider>,
        args: &[String],
    ) -> AppResult<()> {
        let request = parse_args(args)?;
        deliver(provider, &request).await
    }
}

fn parse_args(args: &[String]) -> AppResult<NotificationRequest> {
    let result = match args {
        [token, title, body] => {
            NotificationRequest::new(Some(token.clone()), Some(title.clone()), Some(body.clone()))
        }
        _ => Err(AppError::Validation {
            field: "arguments".to_string(),
            reason: format!("expected 3 arguments, got {}", args.len()),
        }),
    };

    result.inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected send arguments");
        eprintln!("{}", e);
        eprintln!("{}", SEND_USAGE);
    })
}

async fn deliver(provider: Arc<dyn PushProvider>, request: &NotificationRequest) -> AppResult<()> {
    match DispatchService::new(provider).send(request).await {
        Ok(receipt) => {
            println!("Notification sent successfully: {}", receipt.message_id);
            Ok(())
        }
        // Already logged by the dispatch service
        Err(AppError::Delivery(_)) => Ok(()),
        Err(e) => Err(e),
    }
}
