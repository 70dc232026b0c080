//! System health and status handlers.

use axum::Json;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthzResponse {
    /// Service status
    #[schema(example = "OK")]
    pub message: String,
}

/// Health check endpoint
///
/// Returns the current health status of the API
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "system",
    responses(
        (status = 200, description = "Health check successful", body = HealthzResponse)
    )
)]
#[instrument]
pub async fn health() -> Json<HealthzResponse> {
    Json(HealthzResponse {
        message: "OK".to_string(),
    })
}
