//! Health check endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessResponse {
    /// `ready` or `degraded`
    pub status: String,
    pub version: String,
    /// Whether an API key for the summary provider is configured
    pub summary_provider_configured: bool,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint. Book creation cannot succeed without a summary
/// provider key, so its absence reports the service as degraded.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Summary provider not configured", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let configured = state.config.summary.has_api_key();

    let (status, label) = if configured {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(ReadinessResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            summary_provider_configured: configured,
        }),
    )
}
