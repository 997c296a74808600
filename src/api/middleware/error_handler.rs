//! Error handler for converting AppError to HTTP responses.
//!
//! Implements `IntoResponse` for `AppError` with consistent status code
//! mapping and sanitized messages, plus conversion of JSON body rejections.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Maps an error to its HTTP status code.
///
/// Client input defects are 400; provider and server-side failures are 500.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::MissingField { .. } | AppError::Validation { .. } | AppError::BadRequest { .. } => {
            StatusCode::BAD_REQUEST
        }
        AppError::Delivery(_)
        | AppError::Credentials { .. }
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an error to the machine-readable `code` of an [`ErrorResponse`].
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::MissingField { .. } => "MISSING_FIELD",
        AppError::Validation { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Delivery(_) => "DELIVERY_ERROR",
        AppError::Credentials { .. } => "CREDENTIALS_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

fn error_to_response_body(error: &AppError) -> ErrorResponse {
    let code = error_to_code(error);

    match error {
        AppError::MissingField { field } => ErrorResponse::new(code, &error.to_string())
            .with_details(json!({ "field": field })),
        AppError::Validation { field, reason } => {
            ErrorResponse::new(code, &format!("Validation failed for field '{}'", field))
                .with_details(json!({ "field": field, "reason": reason }))
        }
        AppError::BadRequest { message } => ErrorResponse::new(code, message),
        AppError::Delivery(delivery) => ErrorResponse::new(code, &delivery.message).with_details(
            json!({
                "status_code": delivery.status_code,
                "provider_status": delivery.provider_status,
            }),
        ),
        // Credential and configuration details stay in the logs
        AppError::Credentials { .. } => {
            ErrorResponse::new(code, "Push provider credentials are unavailable")
        }
        AppError::Configuration { key, .. } => {
            ErrorResponse::new(code, &format!("Configuration error: {}", key))
        }
        AppError::Internal { .. } => ErrorResponse::new(code, "An internal error occurred"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        }

        (status, Json(error_to_response_body(&self))).into_response()
    }
}

/// Converts axum JSON rejection errors to ErrorResponse.
pub fn handle_json_rejection(rejection: JsonRejection, request_id: Option<&str>) -> Response {
    let error_response = match rejection {
        JsonRejection::JsonDataError(err) => {
            ErrorResponse::new("INVALID_JSON", "Invalid JSON format")
                .with_details(json!({ "error": err.body_text() }))
        }
        JsonRejection::JsonSyntaxError(err) => {
            ErrorResponse::new("JSON_SYNTAX_ERROR", "JSON syntax error")
                .with_details(json!({ "error": err.body_text() }))
        }
        JsonRejection::MissingJsonContentType(_) => ErrorResponse::new(
            "MISSING_CONTENT_TYPE",
            "Missing or invalid Content-Type header",
        )
        .with_details(json!({ "expected": "application/json" })),
        JsonRejection::BytesRejection(_) => {
            ErrorResponse::new("INVALID_BODY", "Failed to read request body")
        }
        _ => ErrorResponse::new("JSON_ERROR", "Failed to parse JSON request"),
    };

    (
        StatusCode::BAD_REQUEST,
        Json(error_response.with_request_id(request_id)),
    )
        .into_response()
}
