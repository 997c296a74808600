//! Notification rendering backends.

use crate::error::{AppError, AppResult};

use super::payload::DisplayedNotification;

/// Platform capability that puts a notification in front of the user
pub trait NotificationDisplay: Send + Sync {
    fn show(&self, notification: &DisplayedNotification) -> AppResult<()>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}

/// Native desktop notifications through the OS notification center
pub struct DesktopDisplay {
    app_name: String,
}

impl DesktopDisplay {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl NotificationDisplay for DesktopDisplay {
    fn show(&self, notification: &DisplayedNotification) -> AppResult<()> {
        notify_rust::Notification::new()
            .appname(&self.app_name)
            .summary(&notification.title)
            .body(&notification.body)
            .icon(&notification.icon)
            .show()
            .map(|_| ())
            .map_err(|e| AppError::Internal {
                source: anyhow::anyhow!("Failed to show desktop notification: {}", e),
            })
    }

    fn name(&self) -> &'static str {
        "desktop"
    }
}

/// Writes each notification to the log instead of the screen.
///
/// Used on headless hosts and by `receive --print-only`.
#[derive(Debug, Default)]
pub struct LogDisplay;

impl NotificationDisplay for LogDisplay {
    fn show(&self, notification: &DisplayedNotification) -> AppResult<()> {
        tracing::info!(
            title = %notification.title,
            body = %notification.body,
            icon = %notification.icon,
            "Notification displayed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
