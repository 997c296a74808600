//! Health check endpoint handlers.
//!
//! Readiness depends on the push provider being able to accept messages
//! (for FCM: an access token can be obtained). Liveness never touches it.

use std::collections::HashMap;
use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::receiver::WORKER_SCRIPT_PATH;
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Basic health check
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Basic health check endpoint.
///
/// Reports the provider check and whether the browser worker is configured.
/// An unconfigured worker only degrades the status; dispatch still works.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy or degraded", body = HealthResponse),
        (status = 503, description = "Push provider is unavailable", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let provider = check_provider(&state).await;
    let worker = check_worker(&state);

    let status = match (provider.status, worker.status) {
        (HealthStatus::Unhealthy, _) | (_, HealthStatus::Unhealthy) => HealthStatus::Unhealthy,
        (HealthStatus::Healthy, HealthStatus::Healthy) => HealthStatus::Healthy,
        _ => HealthStatus::Degraded,
    };

    let checks = HashMap::from([
        ("provider".to_string(), provider),
        ("worker".to_string(), worker),
    ]);

    let response = HealthResponse {
        status,
        version: state.version.clone(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    };

    let code = match status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };

    (code, Json(response))
}

/// Readiness probe endpoint.
///
/// # Responses
/// - `200 OK` - Provider can accept messages
/// - `503 Service Unavailable` - Provider check failed
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match check_provider(&state).await.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded | HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Liveness probe endpoint.
///
/// If we can respond, we're alive.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_provider(state: &AppState) -> ComponentHealth {
    let provider = state.dispatch.provider();
    let start_time = Instant::now();

    let result = provider.check_ready().await;
    let response_time_ms = Some(start_time.elapsed().as_millis() as u64);

    match result {
        Ok(()) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some(format!("{} ready", provider.name())),
            response_time_ms,
        },
        Err(e) => {
            tracing::warn!(provider = provider.name(), error = %e, "Provider readiness check failed");
            ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: Some(format!("{} unavailable: {}", provider.name(), e)),
                response_time_ms,
            }
        }
    }
}

fn check_worker(state: &AppState) -> ComponentHealth {
    let (status, message) = if state.worker_configured {
        (HealthStatus::Healthy, format!("Served at {}", WORKER_SCRIPT_PATH))
    } else {
        (
            HealthStatus::Degraded,
            format!("Missing [worker] identifiers; {} cannot initialize", WORKER_SCRIPT_PATH),
        )
    };

    ComponentHealth {
        status,
        message: Some(message),
        response_time_ms: None,
    }
}
