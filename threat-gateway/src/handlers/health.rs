//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    core_version: &'static str,
    environment: String,
    protected: bool,
    supported_types: usize,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        core_version: threat_core::constants::CORE_VERSION,
        environment: state.config.environment.clone(),
        protected: state.bridge.is_protected(),
        supported_types: state.registry.len(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
