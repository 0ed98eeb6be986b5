//! Threat Event Bridge
//!
//! Nhận native records từ agent, normalize, rồi phát tới mọi listener.
//! Listener failures (errors or panics) are contained per listener and
//! never reach the caller or the other listeners.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::agent::{AgentConfig, ThreatAgent};
use super::normalize::normalize_native;
use crate::threat::ThreatEventPayload;

/// Callback receiving every delivered payload
pub type ThreatListener = Arc<dyn Fn(&ThreatEventPayload) -> anyhow::Result<()> + Send + Sync>;

/// Handle returned by `add_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subscription(pub Uuid);

impl std::fmt::Display for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct ThreatEventBridge {
    agent: Option<Arc<dyn ThreatAgent>>,
    listeners: RwLock<Vec<(Subscription, ThreatListener)>>,
    protected: AtomicBool,
    agent_config: RwLock<Option<AgentConfig>>,
}

impl ThreatEventBridge {
    pub fn new(agent: Option<Arc<dyn ThreatAgent>>) -> Self {
        Self {
            agent,
            listeners: RwLock::new(Vec::new()),
            protected: AtomicBool::new(false),
            agent_config: RwLock::new(None),
        }
    }

    /// Bridge with no agent attached; never protected
    pub fn detached() -> Self {
        Self::new(None)
    }

    // ========================================================================
    // AGENT LIFECYCLE
    // ========================================================================

    /// Initialize the agent. Returns whether protection is active; a
    /// missing agent or a failing one counts as unprotected.
    pub fn initialize(&self) -> bool {
        let Some(agent) = self.agent.as_ref() else {
            log::warn!("No monitoring agent attached - app is not protected");
            self.protected.store(false, Ordering::SeqCst);
            return false;
        };

        log::info!("Initializing threat bridge with agent '{}'", agent.name());
        let is_protected = match agent.initialize() {
            Ok(is_protected) => is_protected,
            Err(e) => {
                log::error!("Failed to initialize agent '{}': {:#}", agent.name(), e);
                false
            }
        };
        self.protected.store(is_protected, Ordering::SeqCst);

        if is_protected {
            log::info!("Agent protection is active - threat detection enabled");
            match agent.config() {
                Ok(config) => {
                    log::info!(
                        "Agent config: version={} features={:?}",
                        config.version,
                        config.enabled_features
                    );
                    *self.agent_config.write() = Some(config);
                }
                Err(e) => log::warn!("Could not read agent config: {:#}", e),
            }
        } else {
            log::warn!("Agent protection not active");
        }

        is_protected
    }

    pub fn is_protected(&self) -> bool {
        self.agent.is_some() && self.protected.load(Ordering::SeqCst)
    }

    /// Last config reported by the agent
    pub fn agent_config(&self) -> Option<AgentConfig> {
        self.agent_config.read().clone()
    }

    /// Manual check. Without an agent this is a logged no-op.
    pub fn trigger_threat_check(&self) -> anyhow::Result<()> {
        match self.agent.as_ref() {
            Some(agent) => agent.trigger_threat_check(),
            None => {
                log::warn!("No monitoring agent available for threat check");
                Ok(())
            }
        }
    }

    /// Drop all listeners and protection state
    pub fn destroy(&self) {
        self.listeners.write().clear();
        self.protected.store(false, Ordering::SeqCst);
        *self.agent_config.write() = None;
        log::info!("Threat bridge destroyed");
    }

    // ========================================================================
    // LISTENERS
    // ========================================================================

    pub fn add_listener<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ThreatEventPayload) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let subscription = Subscription(Uuid::new_v4());
        self.listeners.write().push((subscription, Arc::new(listener)));
        log::debug!("Listener {} added", subscription);
        subscription
    }

    /// Returns false when the subscription was already gone
    pub fn remove_listener(&self, subscription: Subscription) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription);
        before != listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    // ========================================================================
    // DELIVERY
    // ========================================================================

    /// Normalize a native record and deliver it. Returns the number of
    /// listeners that accepted it.
    pub fn handle_native_event(&self, raw: &Value) -> usize {
        let Some(record) = raw.as_object() else {
            log::error!("Failed to handle native threat event: expected an object");
            return 0;
        };

        match normalize_native(record) {
            Ok(payload) => self.emit(&payload),
            Err(e) => {
                log::error!("Failed to handle native threat event: {}", e);
                0
            }
        }
    }

    /// Deliver an already normalized payload to every listener
    pub fn emit(&self, payload: &ThreatEventPayload) -> usize {
        // Snapshot so listeners may (un)subscribe while being called
        let snapshot: Vec<(Subscription, ThreatListener)> = self.listeners.read().clone();

        let mut delivered = 0;
        for (subscription, listener) in snapshot {
            match catch_unwind(AssertUnwindSafe(|| listener(payload))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => {
                    log::error!("Error in threat event listener {}: {:#}", subscription, e);
                }
                Err(_) => {
                    log::error!("Threat event listener {} panicked", subscription);
                }
            }
        }
        delivered
    }
}

impl Default for ThreatEventBridge {
    fn default() -> Self {
        Self::detached()
    }
}

impl std::fmt::Debug for ThreatEventBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreatEventBridge")
            .field("agent", &self.agent.as_ref().map(|a| a.name().to_string()))
            .field("listeners", &self.listener_count())
            .field("protected", &self.is_protected())
            .finish()
    }
}
