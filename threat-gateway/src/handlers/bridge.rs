//! Native bridge handlers

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use threat_core::AgentConfig;

use crate::{AppState, AppResult, AppError};

#[derive(Serialize)]
pub struct DeliveryResponse {
    delivered: usize,
    listeners: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeStatus {
    protected: bool,
    listeners: usize,
    pending_checks: u64,
    agent: Option<AgentConfig>,
}

/// Lenient path: native record is normalized, never rejected
pub async fn native_event(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> AppResult<Json<DeliveryResponse>> {
    if !raw.is_object() {
        return Err(AppError::ValidationError("Native event must be a JSON object".to_string()));
    }

    let delivered = state.bridge.handle_native_event(&raw);
    Ok(Json(DeliveryResponse {
        delivered,
        listeners: state.bridge.listener_count(),
    }))
}

pub async fn trigger_check(State(state): State<AppState>) -> AppResult<Json<BridgeStatus>> {
    state
        .bridge
        .trigger_threat_check()
        .map_err(|e| AppError::AgentError(e.to_string()))?;

    Ok(Json(bridge_status(&state)))
}

pub async fn status(State(state): State<AppState>) -> Json<BridgeStatus> {
    Json(bridge_status(&state))
}

fn bridge_status(state: &AppState) -> BridgeStatus {
    BridgeStatus {
        protected: state.bridge.is_protected(),
        listeners: state.bridge.listener_count(),
        pending_checks: state.agent.pending_checks(),
        agent: state.bridge.agent_config(),
    }
}
