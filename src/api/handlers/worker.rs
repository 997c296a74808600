//! Browser background worker script handler.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::RECEIVER_TAG;
use crate::state::AppState;

pub fn worker_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(worker_script))
}

/// GET /firebase-messaging-sw.js - Background message worker
///
/// Rendered once at startup from the `[worker]` and `[receiver]` settings.
/// Must be served from the site root for the messaging SDK to register it.
#[utoipa::path(
    get,
    path = "/firebase-messaging-sw.js",
    tag = RECEIVER_TAG,
    responses(
        (status = 200, description = "Worker script", body = String, content_type = "application/javascript")
    )
)]
async fn worker_script(State(state): State<AppState>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        state.worker_script.to_string(),
    )
        .into_response()
}
