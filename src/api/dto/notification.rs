//! Notification dispatch DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

/// Plain-text body returned when the provider accepted the message
pub const SEND_SUCCESS_MESSAGE: &str = "Notification sent successfully";

/// Request to push one notification to one device.
///
/// Fields are optional at the parsing layer so that an absent field is
/// reported as `Missing required field: <name>` instead of a JSON error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SendNotificationRequest {
    /// Device registration token issued by the messaging SDK
    #[schema(example = "fMEQx2xZTeS8y2Yx0kG9Nq:APA91bH...")]
    pub token: Option<String>,

    #[schema(example = "Hello")]
    pub title: Option<String>,

    #[schema(example = "World")]
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_null_fields_deserialize_to_none() {
        let request: SendNotificationRequest =
            serde_json::from_str(r#"{"token": "t", "title": null}"#).unwrap();
        assert_eq!(request.token.as_deref(), Some("t"));
        assert!(request.title.is_none());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_non_string_field_is_rejected() {
        let result = serde_json::from_str::<SendNotificationRequest>(r#"{"token": 42}"#);
        assert!(result.is_err());
    }
}
