//! Agent Seam
//!
//! The native monitoring agent is an external collaborator. Hosts plug
//! it in through `ThreatAgent`; the bridge never talks to it directly.

use serde::{Deserialize, Serialize};

/// Agent-reported configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    pub is_protected: bool,
    pub version: String,
    pub enabled_features: Vec<String>,
}

/// Native monitoring agent
pub trait ThreatAgent: Send + Sync {
    /// Start detection; `Ok(true)` when protection is active
    fn initialize(&self) -> anyhow::Result<bool>;

    fn config(&self) -> anyhow::Result<AgentConfig>;

    /// Ask the agent to run its checks now
    fn trigger_threat_check(&self) -> anyhow::Result<()>;

    fn name(&self) -> &str {
        "native-agent"
    }
}
