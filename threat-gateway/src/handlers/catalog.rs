//! Handler catalog handlers

use axum::{extract::{State, Path}, Json};
use serde::Serialize;

use threat_core::{EventType, Severity, ThreatHandler};

use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerList {
    supported_types: Vec<EventType>,
    handlers: Vec<ThreatHandler>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedHandler {
    event_type: String,
    supported: bool,
    handler: ThreatHandler,
}

#[derive(Serialize)]
pub struct SeverityInfo {
    severity: Severity,
    level: u8,
    color: &'static str,
    text: &'static str,
}

pub async fn list(State(state): State<AppState>) -> Json<HandlerList> {
    let supported_types = state.registry.supported_types();
    let handlers = supported_types
        .iter()
        .map(|t| state.registry.create_handler_for(t.as_str()))
        .collect();

    Json(HandlerList {
        supported_types,
        handlers,
    })
}

/// Total: unknown types resolve to the fallback
pub async fn get(
    State(state): State<AppState>,
    Path(event_type): Path<String>,
) -> Json<ResolvedHandler> {
    Json(ResolvedHandler {
        supported: state.registry.is_supported(&event_type),
        handler: state.registry.create_handler_for(&event_type),
        event_type,
    })
}

pub async fn severities() -> Json<Vec<SeverityInfo>> {
    Json(
        Severity::ALL
            .iter()
            .map(|s| SeverityInfo {
                severity: *s,
                level: s.severity_level(),
                color: s.color(),
                text: s.display_text(),
            })
            .collect(),
    )
}
