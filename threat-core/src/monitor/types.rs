use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::MonitorConfig;
use crate::handlers::ThreatHandler;
use crate::threat::{ProcessedThreatEvent, Severity};

/// How a display layer should treat an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPolicy {
    /// Dismiss automatically after this many milliseconds
    pub auto_dismiss_after_ms: Option<u64>,
    /// User must explicitly acknowledge
    pub requires_acknowledgement: bool,
}

impl AlertPolicy {
    /// Low -> auto-dismiss (when enabled), Critical -> acknowledge
    pub fn for_severity(severity: Severity, config: &MonitorConfig) -> Self {
        Self {
            auto_dismiss_after_ms: (severity == Severity::Low && config.auto_dismiss_low)
                .then_some(config.auto_dismiss_delay_ms),
            requires_acknowledgement: severity == Severity::Critical,
        }
    }

    pub fn dismiss_deadline(&self, received_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let ms = i64::try_from(self.auto_dismiss_after_ms?).ok()?;
        received_at.checked_add_signed(Duration::milliseconds(ms))
    }
}

/// One received threat with its resolved guidance
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoredThreat {
    pub event: ProcessedThreatEvent,
    pub handler: ThreatHandler,
    pub policy: AlertPolicy,
    pub received_at: DateTime<Utc>,
}

impl MonitoredThreat {
    pub fn uuid(&self) -> &str {
        &self.event.identifiers.uuid
    }

    /// Severity shown to the user (from the handler)
    pub fn display_severity(&self) -> Severity {
        self.handler.severity()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.policy
            .dismiss_deadline(self.received_at)
            .map(|deadline| now >= deadline)
            .unwrap_or(false)
    }
}

/// Counts over the history, by handler severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatStats {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub resolved: usize,
    pub unresolved: usize,
}

impl ThreatStats {
    pub(crate) fn record(&mut self, threat: &MonitoredThreat) {
        self.total += 1;
        match threat.display_severity() {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
        if threat.event.resolved {
            self.resolved += 1;
        } else {
            self.unresolved += 1;
        }
    }
}
