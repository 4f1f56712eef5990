//! Health check handler.

use axum::Json;
use chrono::Utc;

use crate::dto::response::HealthResponse;

/// GET /auth/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        service: "Authentication Service".to_string(),
        timestamp: Utc::now(),
    })
}
