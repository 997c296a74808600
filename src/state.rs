//! Application state for Axum web framework.
//!
//! Holds the process-wide dispatch service and the values rendered once at
//! startup. Accessible across all request handlers.

use std::sync::Arc;

use crate::config::Settings;
use crate::receiver::render_worker_script;
use crate::services::{DispatchService, PushProvider};

/// Application state shared by all handlers.
///
/// Cloning is cheap: the provider handle and the rendered worker script are
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Dispatch operation wrapping the provider handle
    pub dispatch: DispatchService,
    /// Browser worker script, rendered from `[worker]` and `[receiver]`
    pub worker_script: Arc<str>,
    /// Whether the worker has the identifiers the messaging SDK needs
    pub worker_configured: bool,
    /// Application version reported by health checks
    pub version: String,
}

impl AppState {
    /// Creates the state from loaded settings and an initialized provider.
    ///
    /// # Example
    /// ```ignore
    /// let provider = Arc::new(FcmProvider::from_config(&settings.fcm)?);
    /// let state = AppState::new(&settings, provider);
    /// ```
    pub fn new(settings: &Settings, provider: Arc<dyn PushProvider>) -> Self {
        Self {
            dispatch: DispatchService::new(provider),
            worker_script: render_worker_script(&settings.worker, &settings.receiver).into(),
            worker_configured: settings.worker.is_configured(),
            version: settings.application.version.clone(),
        }
    }
}
