//! HTTP delivery agent
//!
//! Remote monitoring agents push events over HTTP instead of a native
//! channel. Check requests are queued as a counter that agents read back
//! from `/api/v1/bridge/status`.

use std::sync::atomic::{AtomicU64, Ordering};

use threat_core::{AgentConfig, ThreatAgent};

pub struct HttpAgent {
    version: String,
    pending_checks: AtomicU64,
}

impl HttpAgent {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            pending_checks: AtomicU64::new(0),
        }
    }

    pub fn pending_checks(&self) -> u64 {
        self.pending_checks.load(Ordering::SeqCst)
    }
}

impl ThreatAgent for HttpAgent {
    fn initialize(&self) -> anyhow::Result<bool> {
        tracing::info!("HTTP delivery agent ready (version {})", self.version);
        Ok(true)
    }

    fn config(&self) -> anyhow::Result<AgentConfig> {
        Ok(AgentConfig {
            is_protected: true,
            version: self.version.clone(),
            enabled_features: vec![
                "http-delivery".to_string(),
                "strict-ingest".to_string(),
                "native-normalize".to_string(),
            ],
        })
    }

    fn trigger_threat_check(&self) -> anyhow::Result<()> {
        let queued = self.pending_checks.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Threat check requested ({} pending)", queued);
        Ok(())
    }

    fn name(&self) -> &str {
        "http"
    }
}
