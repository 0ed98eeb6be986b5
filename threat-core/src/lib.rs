//! Threat Core - Mobile Threat Event Engine
//!
//! Classifies threat events emitted by the on-device monitoring agent,
//! resolves per-type guidance, and assembles display-ready records.
//!
//! ## Structure
//! - `threat/` - Payload model, validation, extraction, severity, processing
//! - `handlers/` - Handler catalog and the type-to-handler registry
//! - `bridge/` - Delivery bridge between the agent and in-process listeners
//! - `monitor/` - Current alert + bounded history for display layers
//! - `config` / `constants` - Runtime configuration and defaults
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use threat_core::{process_payload, ThreatHandlerRegistry};
//!
//! let registry = Arc::new(ThreatHandlerRegistry::new());
//! let event = process_payload(&raw_json, Some("Acme"))?;
//! let handler = registry.create_handler(&event.payload);
//! println!("{} [{}]", handler.title(), event.severity);
//! ```

pub mod constants;
pub mod config;
pub mod threat;
pub mod handlers;
pub mod bridge;
pub mod monitor;

pub use config::MonitorConfig;

pub use threat::{
    Severity,
    ThreatEventPayload,
    ProcessedThreatEvent,
    ThreatSummary,
    ThreatError,
    ThreatResult,
    validate_payload,
    determine_severity,
    process_payload,
    format_user_message,
};

pub use handlers::{EventType, HandlerFactory, ThreatHandler, ThreatHandlerRegistry};

pub use bridge::{normalize_native, AgentConfig, Subscription, ThreatAgent, ThreatEventBridge, ThreatListener};

pub use monitor::{AlertPolicy, MonitoredThreat, ThreatMonitor, ThreatStats};
