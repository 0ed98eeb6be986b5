//! Monitor Module
//!
//! Holds what the display layer needs right now: the current alert and a
//! bounded, newest-first history of received threats. In-memory only.

pub mod types;
pub mod manager;


pub use types::{AlertPolicy, MonitoredThreat, ThreatStats};
pub use manager::ThreatMonitor;
