use axum::response::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Unix seconds at which the probe was answered
    pub timestamp: i64,
}

impl HealthResponse {
    fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now().timestamp(),
        }
    }
}

// GET /health - Liveness probe, does not touch the store
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
