//! Threat Handler Descriptor
//!
//! Immutable behavior bundle for one event type: severity, title,
//! description, user guidance and remediation steps. A descriptor with
//! no event type is the fallback and accepts every payload.

use std::borrow::Cow;

use serde::Serialize;

use super::catalog::CatalogEntry;
use super::event_type::EventType;
use crate::threat::{parse_timestamp, Severity, ThreatEventPayload};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatHandler {
    /// `None` = fallback handler
    pub event_type: Option<EventType>,
    pub severity: Severity,
    pub title: Cow<'static, str>,
    pub description: Cow<'static, str>,
    pub user_guidance: Cow<'static, str>,
    pub recommended_actions: Vec<Cow<'static, str>>,
}

impl ThreatHandler {
    /// Descriptor for a host-defined event type. `None` builds a fallback.
    pub fn new(
        event_type: Option<EventType>,
        severity: Severity,
        title: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            event_type,
            severity,
            title: title.into(),
            description: Cow::Borrowed(""),
            user_guidance: Cow::Borrowed(""),
            recommended_actions: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_user_guidance(mut self, guidance: impl Into<Cow<'static, str>>) -> Self {
        self.user_guidance = guidance.into();
        self
    }

    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.recommended_actions = actions.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            event_type: entry.event_type.clone(),
            severity: entry.severity,
            title: Cow::Borrowed(entry.title),
            description: Cow::Borrowed(entry.description),
            user_guidance: Cow::Borrowed(entry.user_guidance),
            recommended_actions: entry.actions.iter().map(|a| Cow::Borrowed(*a)).collect(),
        }
    }

    // ========================================================================
    // CAPABILITIES
    // ========================================================================

    pub fn can_handle(&self, payload: &ThreatEventPayload) -> bool {
        match &self.event_type {
            Some(event_type) => event_type.as_str() == payload.external_id,
            None => true,
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn user_guidance(&self) -> &str {
        &self.user_guidance
    }

    pub fn recommended_actions(&self) -> Vec<&str> {
        self.recommended_actions.iter().map(|a| a.as_ref()).collect()
    }

    pub fn is_fallback(&self) -> bool {
        self.event_type.is_none()
    }

    /// Telemetry hook, log only
    pub fn process_event(&self, payload: &ThreatEventPayload) {
        log::info!(
            "Processing threat event: {} (threatCode={}, timestamp={}, deviceID={})",
            payload.external_id,
            payload.threat_code,
            payload.timestamp,
            payload.device_id
        );
    }

    // ========================================================================
    // PRESENTATION HELPERS
    // ========================================================================

    /// "manufacturer model (Android osVersion)"
    pub fn device_summary(&self, payload: &ThreatEventPayload) -> String {
        format!(
            "{} {} (Android {})",
            payload.device_manufacturer, payload.device_model, payload.os_version
        )
    }

    pub fn format_detection_time(&self, timestamp: &str) -> String {
        parse_timestamp(timestamp)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
    }
}

impl std::fmt::Display for ThreatHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.title, self.severity)
    }
}
