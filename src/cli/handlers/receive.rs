//! Receive command handler
//!
//! Feeds newline-delimited push payloads to the background receiver.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::receiver::{
    BackgroundReceiver, DesktopDisplay, LogDisplay, NotificationDisplay, PushPayload,
};

/// Counters reported when the input is exhausted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveSummary {
    pub displayed: usize,
    pub dropped: usize,
    pub invalid: usize,
    pub failed: usize,
}

/// Handler for the receive command
pub struct ReceiveCommandHandler {
    receiver: BackgroundReceiver,
}

impl ReceiveCommandHandler {
    /// Builds a handler rendering to the desktop, or to the log with `print_only`
    pub fn new(config: &Settings, print_only: bool) -> Self {
        let display: Arc<dyn NotificationDisplay> = if print_only {
            Arc::new(LogDisplay)
        } else {
            Arc::new(DesktopDisplay::new(config.application.name.clone()))
        };
        Self::with_display(config, display)
    }

    pub fn with_display(config: &Settings, display: Arc<dyn NotificationDisplay>) -> Self {
        Self {
            receiver: BackgroundReceiver::new(config.receiver.clone(), display),
        }
    }

    /// Reads payloads from `input`, or stdin when `None`, until end of input.
    ///
    /// Blocking; callers on the async runtime should use
    /// [`tokio::task::spawn_blocking`].
    pub fn execute(&self, input: Option<&Path>) -> AppResult<ReceiveSummary> {
        let summary = match input {
            Some(path) => {
                let file = File::open(path).map_err(|e| AppError::BadRequest {
                    message: format!("Cannot open input '{}': {}", path.display(), e),
                })?;
                self.process(BufReader::new(file))?
            }
            None => self.process(io::stdin().lock())?,
        };

        tracing::info!(
            displayed = summary.displayed,
            dropped = summary.dropped,
            invalid = summary.invalid,
            failed = summary.failed,
            "Input exhausted"
        );

        Ok(summary)
    }

    /// Handles one payload per non-blank line.
    ///
    /// Invalid lines and display failures are logged and counted; only a
    /// read error stops processing.
    pub fn process<R: BufRead>(&self, reader: R) -> AppResult<ReceiveSummary> {
        let mut summary = ReceiveSummary::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| AppError::Internal {
                source: anyhow::Error::new(e).context("Failed to read payload input"),
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let payload = match PushPayload::from_json(&line) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!(line = index + 1, error = %e, "Skipping invalid payload");
                    summary.invalid += 1;
                    continue;
                }
            };

            match self.receiver.handle(&payload) {
                Ok(Some(_)) => summary.displayed += 1,
                Ok(None) => summary.dropped += 1,
                Err(_) => summary.failed += 1,
            }
        }

        Ok(summary)
    }
}

/// Runs the handler on the blocking pool
pub async fn run_receive(
    config: &Settings,
    input: Option<PathBuf>,
    print_only: bool,
) -> AppResult<ReceiveSummary> {
    let handler = ReceiveCommandHandler::new(config, print_only);

    tokio::task::spawn_blocking(move || handler.execute(input.as_deref()))
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::new(e).context("Receive task panicked"),
        })?
}
