//! Notification dispatch handler.
//!
//! The HTTP adapter of the dispatch operation. Responses are plain text so
//! existing callers that only read the status line and message keep working.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{SEND_SUCCESS_MESSAGE, SendNotificationRequest};
use crate::api::middleware::{RequestId, handle_json_rejection};
use crate::error::AppError;
use crate::state::AppState;

/// Creates notification routes.
///
/// Routes:
/// - POST /sendNotification - dispatch one notification
pub fn notification_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(send_notification))
}

/// POST /sendNotification - Push a notification to one device
///
/// The provider is called at most once; nothing is retried.
#[utoipa::path(
    post,
    path = "/sendNotification",
    tag = NOTIFICATION_TAG,
    request_body = SendNotificationRequest,
    responses(
        (status = 200, description = "Provider accepted the message", body = String, content_type = "text/plain",
            example = json!("Notification sent successfully")),
        (status = 400, description = "A required field is missing or empty (text/plain), or the body is not a valid JSON request (ErrorResponse)",
            body = String, content_type = "text/plain", example = json!("Missing required field: token")),
        (status = 500, description = "Provider rejected the message or was unreachable", body = String, content_type = "text/plain",
            example = json!("Error sending notification: Requested entity was not found."))
    )
)]
async fn send_notification(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    payload: Result<Json<SendNotificationRequest>, JsonRejection>,
) -> Response {
    let request_id = request_id.map(|Extension(id)| id.0);

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return handle_json_rejection(rejection, request_id.as_deref()),
    };

    match state
        .dispatch
        .dispatch(request.token, request.title, request.body)
        .await
    {
        Ok(_) => (StatusCode::OK, SEND_SUCCESS_MESSAGE).into_response(),
        Err(error @ AppError::MissingField { .. }) => {
            (StatusCode::BAD_REQUEST, error.to_string()).into_response()
        }
        Err(AppError::Delivery(error)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error sending notification: {}", error.message),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}
