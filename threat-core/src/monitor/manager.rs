use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::Value;

use super::types::{AlertPolicy, MonitoredThreat, ThreatStats};
use crate::bridge::{Subscription, ThreatEventBridge};
use crate::config::MonitorConfig;
use crate::handlers::ThreatHandlerRegistry;
use crate::threat::{
    process_payload, process_validated, ProcessedThreatEvent, ThreatEventPayload, ThreatResult,
};

#[derive(Default)]
struct MonitorState {
    current: Option<MonitoredThreat>,
    /// Newest first
    history: VecDeque<MonitoredThreat>,
}

/// Current alert + bounded history. Shared by the bridge listener and
/// the display layer; every operation takes the state lock briefly.
pub struct ThreatMonitor {
    registry: Arc<ThreatHandlerRegistry>,
    config: MonitorConfig,
    state: Mutex<MonitorState>,
}

impl ThreatMonitor {
    pub fn new(registry: Arc<ThreatHandlerRegistry>, config: MonitorConfig) -> Self {
        Self {
            registry,
            config,
            state: Mutex::new(MonitorState::default()),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ThreatHandlerRegistry> {
        &self.registry
    }

    // ========================================================================
    // INGEST
    // ========================================================================

    /// Validate + process a raw record, then record it
    pub fn ingest_raw(&self, raw: &Value) -> ThreatResult<MonitoredThreat> {
        let event = process_payload(raw, self.app_name())?;
        Ok(self.record(event))
    }

    /// Record an already typed payload (bridge path)
    pub fn ingest(&self, payload: ThreatEventPayload) -> MonitoredThreat {
        let event = process_validated(payload, self.app_name());
        self.record(event)
    }

    /// Subscribe this monitor to a bridge
    pub fn attach(self: &Arc<Self>, bridge: &ThreatEventBridge) -> Subscription {
        let monitor = Arc::clone(self);
        bridge.add_listener(move |payload| {
            monitor.ingest(payload.clone());
            Ok(())
        })
    }

    fn app_name(&self) -> Option<&str> {
        self.config.app_display_name.as_deref()
    }

    fn record(&self, event: ProcessedThreatEvent) -> MonitoredThreat {
        let handler = self.registry.create_handler(&event.payload);
        handler.process_event(&event.payload);

        log::warn!(
            "[THREAT DETECTED] {} - {} (threatCode={}, deviceID={})",
            event.payload.external_id,
            handler,
            event.payload.threat_code,
            event.payload.device_id
        );

        let threat = MonitoredThreat {
            policy: AlertPolicy::for_severity(handler.severity(), &self.config),
            event,
            handler,
            received_at: Utc::now(),
        };

        let mut state = self.state.lock();
        state.current = Some(threat.clone());
        state.history.push_front(threat.clone());
        state.history.truncate(self.config.history_limit.max(1));

        threat
    }

    // ========================================================================
    // CURRENT ALERT
    // ========================================================================

    pub fn current(&self) -> Option<MonitoredThreat> {
        self.state.lock().current.clone()
    }

    pub fn dismiss_current(&self) -> Option<MonitoredThreat> {
        self.state.lock().current.take()
    }

    /// Dismiss the current alert if its auto-dismiss deadline has passed
    pub fn expire_current(&self, now: DateTime<Utc>) -> Option<MonitoredThreat> {
        let mut state = self.state.lock();
        if state.current.as_ref().is_some_and(|t| t.is_expired(now)) {
            let expired = state.current.take();
            if let Some(threat) = &expired {
                log::debug!("Auto-dismissed low severity alert {}", threat.uuid());
            }
            return expired;
        }
        None
    }

    // ========================================================================
    // HISTORY
    // ========================================================================

    /// Newest first
    pub fn history(&self) -> Vec<MonitoredThreat> {
        self.state.lock().history.iter().cloned().collect()
    }

    pub fn recent(&self, limit: usize) -> Vec<MonitoredThreat> {
        self.state.lock().history.iter().take(limit).cloned().collect()
    }

    pub fn clear_history(&self) -> usize {
        let mut state = self.state.lock();
        let cleared = state.history.len();
        state.history.clear();
        cleared
    }

    pub fn find(&self, uuid: &str) -> Option<MonitoredThreat> {
        self.state
            .lock()
            .history
            .iter()
            .find(|t| t.uuid() == uuid)
            .cloned()
    }

    /// Mark every stored copy with this UUID resolved
    pub fn resolve(&self, uuid: &str) -> bool {
        let mut state = self.state.lock();
        let mut found = false;

        for threat in state.history.iter_mut().filter(|t| t.uuid() == uuid) {
            threat.event.resolved = true;
            found = true;
        }
        if let Some(current) = state.current.as_mut().filter(|t| t.uuid() == uuid) {
            current.event.resolved = true;
            found = true;
        }

        found
    }

    pub fn stats(&self) -> ThreatStats {
        let state = self.state.lock();
        let mut stats = ThreatStats::default();
        for threat in &state.history {
            stats.record(threat);
        }
        stats
    }
}

impl std::fmt::Debug for ThreatMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ThreatMonitor")
            .field("config", &self.config)
            .field("has_current", &state.current.is_some())
            .field("history", &state.history.len())
            .finish()
    }
}
