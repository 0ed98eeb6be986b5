//! Threat handlers

use axum::{extract::{State, Path, Query}, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use threat_core::threat::{create_summary, extract_support_ref, format_messages, ThreatMessages};
use threat_core::{MonitoredThreat, ThreatStats, ThreatSummary};

use crate::{AppState, AppResult, AppError};

const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize, Validate)]
pub struct HistoryQuery {
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct ClearResponse {
    cleared: usize,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    uuid: String,
    resolved: bool,
}

/// Display-ready view of one stored threat
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatView {
    summary: ThreatSummary,
    messages: ThreatMessages,
    device: String,
    detected_at: String,
    support_ref: Option<String>,
}

/// Strict ingest: required fields must be present
pub async fn ingest(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> AppResult<Json<MonitoredThreat>> {
    let threat = state.monitor.ingest_raw(&raw)?;
    tracing::info!(
        "Threat ingested: {} ({}) severity={}",
        threat.event.payload.external_id,
        threat.uuid(),
        threat.display_severity()
    );
    Ok(Json(threat))
}

/// History, newest first
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<MonitoredThreat>>> {
    query.validate()?;
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    Ok(Json(state.monitor.recent(limit)))
}

pub async fn clear(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.monitor.clear_history();
    tracing::info!("Threat history cleared ({} entries)", cleared);
    Json(ClearResponse { cleared })
}

/// Current alert; expired low-severity alerts are dismissed first
pub async fn current(State(state): State<AppState>) -> AppResult<Json<MonitoredThreat>> {
    state.monitor.expire_current(chrono::Utc::now());
    state
        .monitor
        .current()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No active threat".to_string()))
}

pub async fn dismiss(State(state): State<AppState>) -> AppResult<Json<MonitoredThreat>> {
    state
        .monitor
        .dismiss_current()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No active threat".to_string()))
}

pub async fn stats(State(state): State<AppState>) -> Json<ThreatStats> {
    Json(state.monitor.stats())
}

pub async fn get(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> AppResult<Json<MonitoredThreat>> {
    let threat = state
        .monitor
        .find(&uuid)
        .ok_or_else(|| AppError::NotFound("Threat not found".to_string()))?;

    Ok(Json(threat))
}

pub async fn summary(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> AppResult<Json<ThreatView>> {
    let threat = state
        .monitor
        .find(&uuid)
        .ok_or_else(|| AppError::NotFound("Threat not found".to_string()))?;

    let app_name = state.config.monitor.app_display_name.as_deref();
    let payload = &threat.event.payload;

    Ok(Json(ThreatView {
        summary: create_summary(&threat.event),
        messages: format_messages(&threat.event.messages, app_name),
        device: threat.handler.device_summary(payload),
        detected_at: threat.handler.format_detection_time(&payload.timestamp),
        support_ref: extract_support_ref(&payload.message),
    }))
}

pub async fn resolve(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> AppResult<Json<ResolveResponse>> {
    if !state.monitor.resolve(&uuid) {
        return Err(AppError::NotFound("Threat not found".to_string()));
    }

    tracing::info!("Threat resolved: {}", uuid);
    Ok(Json(ResolveResponse { uuid, resolved: true }))
}
