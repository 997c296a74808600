use utoipa::OpenApi;

pub const NOTIFICATION_TAG: &str = "Notifications";
pub const RECEIVER_TAG: &str = "Receiver";
pub const HEALTH_TAG: &str = "Health";

/// Path the OpenAPI document is served from
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "push-relay",
        description = "Relays notification requests to Firebase Cloud Messaging",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = NOTIFICATION_TAG, description = "Notification dispatch endpoints"),
        (name = RECEIVER_TAG, description = "Browser background receiver"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
