use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
}

/// Health check endpoint
///
/// Returns the health status of the API and its database
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service status", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Json<HealthResponse> {
    let mut services = HashMap::new();

    let database_up = match state.persist.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            false
        }
    };
    services.insert(
        "database".to_string(),
        if database_up { "connected" } else { "disconnected" }.to_string(),
    );

    Json(HealthResponse {
        status: if database_up { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
    })
}
