//! Notification models for the dispatch path.
//!
//! Nothing here is persisted: a request is built from transport input,
//! consumed by one dispatch and dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A validated request to push one notification to one device.
///
/// All three fields are guaranteed non-empty. Whitespace is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRequest {
    recipient_token: String,
    title: String,
    body: String,
}

impl NotificationRequest {
    /// Builds a request from possibly-absent transport fields.
    ///
    /// Fields are checked in the order token, title, body; the first one that
    /// is absent or empty is reported as `MissingField`.
    pub fn new(
        recipient_token: Option<String>,
        title: Option<String>,
        body: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            recipient_token: require("token", recipient_token)?,
            title: require("title", title)?,
            body: require("body", body)?,
        })
    }

    pub fn recipient_token(&self) -> &str {
        &self.recipient_token
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

fn require(field: &'static str, value: Option<String>) -> AppResult<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::MissingField { field }),
    }
}

/// Provider acknowledgment for an accepted message.
///
/// For FCM the id is the message resource name,
/// e.g. `projects/my-project/messages/0:1500415314455276%31bd1c9631bd1c96`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeliveryReceipt {
    pub message_id: String,
}

impl DeliveryReceipt {
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
        }
    }
}

/// Lifecycle of a single dispatch. `Delivered` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStatus {
    Pending,
    Delivered,
    Failed,
}

impl DispatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchStatus::Pending => "pending",
            DispatchStatus::Delivered => "delivered",
            DispatchStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for DispatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_valid_request() {
        let request = NotificationRequest::new(some("tok"), some("Hello"), some("World")).unwrap();
        assert_eq!(request.recipient_token(), "tok");
        assert_eq!(request.title(), "Hello");
        assert_eq!(request.body(), "World");
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let err = NotificationRequest::new(None, None, None).unwrap_err();
        assert!(matches!(err, AppError::MissingField { field: "token" }));

        let err = NotificationRequest::new(some("tok"), some(""), None).unwrap_err();
        assert!(matches!(err, AppError::MissingField { field: "title" }));

        let err = NotificationRequest::new(some("tok"), some("Hello"), some("")).unwrap_err();
        assert!(matches!(err, AppError::MissingField { field: "body" }));
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        let request = NotificationRequest::new(some(" "), some("  Hi "), some("\t")).unwrap();
        assert_eq!(request.recipient_token(), " ");
        assert_eq!(request.title(), "  Hi ");
    }

    #[test]
    fn test_dispatch_status_display() {
        assert_eq!(DispatchStatus::Pending.as_str(), "pending");
        assert_eq!(DispatchStatus::Delivered.to_string(), "delivered");
        assert_eq!(DispatchStatus::Failed.to_string(), "failed");
    }
}
