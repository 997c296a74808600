//! Router configuration for the API.
//!
//! Centralized route registration and middleware configuration.

use axum::{Json, Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::api::doc::{ApiDoc, OPENAPI_JSON_PATH};
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID middleware - generates/propagates request IDs
/// 2. Logging middleware - logs requests with request IDs
/// 3. CORS (when enabled) - answers preflights, adds allow-origin headers
///
/// # Routes
/// - `POST /sendNotification`, `POST /api/sendNotification` - dispatch
/// - `GET /firebase-messaging-sw.js` - browser background worker
/// - `GET /health`, `/health/live`, `/health/ready` - probes
/// - `GET /api-docs/openapi.json` - OpenAPI document
pub fn create_router(state: AppState, cors_enabled: bool) -> Router {
    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::notifications::notification_routes())
        .nest("/api", handlers::notifications::notification_routes())
        .merge(handlers::worker::worker_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    let router = router.route(
        OPENAPI_JSON_PATH,
        get(move || {
            let openapi = openapi.clone();
            async move { Json(openapi) }
        }),
    );

    let router = if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
