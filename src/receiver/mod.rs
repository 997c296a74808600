//! Background receiver.
//!
//! Turns provider-pushed payloads into OS notifications. The Rust
//! [`BackgroundReceiver`] drives the `receive` command; the browser worker
//! script applies the same rules inside a service worker.

mod display;
mod payload;
mod worker_script;

pub use display::{DesktopDisplay, LogDisplay, NotificationDisplay};
pub use payload::{DisplayedNotification, NotificationPayload, PushPayload};
pub use worker_script::{WORKER_SCRIPT_PATH, render_worker_script};

#[cfg(test)]
pub(crate) use display::testing;

use std::sync::Arc;

use crate::config::{FallbackPolicy, ReceiverSettings};
use crate::error::AppResult;

/// Renders push payloads through a [`NotificationDisplay`].
///
/// Holds no state between payloads; each call renders at most one
/// notification and repeated payloads are rendered again.
pub struct BackgroundReceiver {
    settings: ReceiverSettings,
    display: Arc<dyn NotificationDisplay>,
}

impl BackgroundReceiver {
    pub fn new(settings: ReceiverSettings, display: Arc<dyn NotificationDisplay>) -> Self {
        Self { settings, display }
    }

    /// Handles one payload.
    ///
    /// Returns the rendered notification, or `None` when the payload carries
    /// no notification block and the fallback policy is `drop`. A display
    /// failure is logged and returned as an error.
    pub fn handle(&self, payload: &PushPayload) -> AppResult<Option<DisplayedNotification>> {
        tracing::debug!(
            from = payload.from.as_deref(),
            fcm_message_id = payload.fcm_message_id.as_deref(),
            data_keys = payload.data.len(),
            "Received background message"
        );

        let Some(notification) = self.resolve(payload) else {
            tracing::warn!(
                fcm_message_id = payload.fcm_message_id.as_deref(),
                "Dropping background message without a notification block"
            );
            return Ok(None);
        };

        self.display.show(&notification).inspect_err(|e| {
            tracing::error!(
                display = self.display.name(),
                error = %e,
                "Failed to display notification"
            );
        })?;

        Ok(Some(notification))
    }

    fn resolve(&self, payload: &PushPayload) -> Option<DisplayedNotification> {
        let icon = self.settings.icon.clone();

        match (&payload.notification, self.settings.fallback) {
            (Some(notification), _) => Some(DisplayedNotification {
                title: notification.title.clone().unwrap_or_default(),
                body: notification.body.clone().unwrap_or_default(),
                icon,
            }),
            (None, FallbackPolicy::Generic) => Some(DisplayedNotification {
                title: self.settings.generic_title.clone(),
                body: self.settings.generic_body.clone(),
                icon,
            }),
            (None, FallbackPolicy::Drop) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use testing::RecordingDisplay;

    fn receiver(fallback: FallbackPolicy, display: &Arc<RecordingDisplay>) -> BackgroundReceiver {
        let settings = ReceiverSettings {
            fallback,
            ..Default::default()
        };
        BackgroundReceiver::new(settings, display.clone())
    }

    #[test]
    fn test_renders_exactly_one_notification() {
        let display = Arc::new(RecordingDisplay::default());
        let receiver = receiver(FallbackPolicy::Drop, &display);

        let shown = receiver
            .handle(&PushPayload::with_notification("X", "Y"))
            .unwrap();

        let expected = DisplayedNotification {
            title: "X".to_string(),
            body: "Y".to_string(),
            icon: "/icons/Icon-192.png".to_string(),
        };
        assert_eq!(shown, Some(expected.clone()));
        assert_eq!(display.shown(), vec![expected]);
    }

    #[test]
    fn test_missing_notification_is_dropped_by_default() {
        let display = Arc::new(RecordingDisplay::default());
        let receiver = receiver(FallbackPolicy::default(), &display);

        let shown = receiver.handle(&PushPayload::default()).unwrap();

        assert!(shown.is_none());
        assert!(display.shown().is_empty());
    }

    #[test]
    fn test_missing_notification_with_generic_fallback() {
        let display = Arc::new(RecordingDisplay::default());
        let receiver = receiver(FallbackPolicy::Generic, &display);

        let shown = receiver.handle(&PushPayload::default()).unwrap().unwrap();

        assert_eq!(shown.title, "New notification");
        assert_eq!(shown.body, "You have a new message");
        assert_eq!(display.shown().len(), 1);
    }

    #[test]
    fn test_partial_notification_renders_empty_strings() {
        let display = Arc::new(RecordingDisplay::default());
        let receiver = receiver(FallbackPolicy::Generic, &display);
        let payload = PushPayload {
            notification: Some(NotificationPayload {
                title: Some("Only title".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let shown = receiver.handle(&payload).unwrap().unwrap();
        assert_eq!(shown.title, "Only title");
        assert_eq!(shown.body, "");
    }

    #[test]
    fn test_repeated_payloads_are_rendered_again() {
        let display = Arc::new(RecordingDisplay::default());
        let receiver = receiver(FallbackPolicy::Drop, &display);
        let payload = PushPayload::with_notification("X", "Y");

        receiver.handle(&payload).unwrap();
        receiver.handle(&payload).unwrap();

        assert_eq!(display.shown().len(), 2);
    }

    #[test]
    fn test_display_failure_is_returned() {
        let display = Arc::new(RecordingDisplay::failing());
        let receiver = receiver(FallbackPolicy::Drop, &display);

        let err = receiver
            .handle(&PushPayload::with_notification("X", "Y"))
            .unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
