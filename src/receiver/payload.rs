//! Payloads delivered to the background receiver.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Message as handed to a background handler by the messaging platform.
///
/// Only `notification` drives rendering; the remaining fields are kept for
/// logging. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushPayload {
    #[serde(default)]
    pub notification: Option<NotificationPayload>,

    #[serde(default)]
    pub data: HashMap<String, String>,

    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub fcm_message_id: Option<String>,

    #[serde(default)]
    pub collapse_key: Option<String>,
}

/// Display block of a push payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub image: Option<String>,
}

impl PushPayload {
    /// Parses one JSON payload.
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::BadRequest {
            message: format!("Invalid push payload: {}", e),
        })
    }

    /// Convenience constructor for a payload with a notification block
    pub fn with_notification(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            notification: Some(NotificationPayload {
                title: Some(title.into()),
                body: Some(body.into()),
                image: None,
            }),
            ..Default::default()
        }
    }
}

/// A notification as rendered on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayedNotification {
    pub title: String,
    pub body: String,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let payload = PushPayload::from_json(
            r#"{
                "notification": {"title": "X", "body": "Y"},
                "data": {"orderId": "42"},
                "from": "505805164580",
                "fcmMessageId": "0:1700000000000000%abc",
                "collapseKey": "campaign",
                "priority": "high"
            }"#,
        )
        .unwrap();

        assert_eq!(payload, PushPayload {
            data: HashMap::from([("orderId".to_string(), "42".to_string())]),
            from: Some("505805164580".to_string()),
            fcm_message_id: Some("0:1700000000000000%abc".to_string()),
            collapse_key: Some("campaign".to_string()),
            ..PushPayload::with_notification("X", "Y")
        });
    }

    #[test]
    fn test_parse_data_only_payload() {
        let payload = PushPayload::from_json(r#"{"data": {"k": "v"}}"#).unwrap();
        assert!(payload.notification.is_none());
        assert_eq!(payload.data.get("k").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_parse_invalid_payload() {
        let err = PushPayload::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
