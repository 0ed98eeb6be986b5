//! Threat Module
//!
//! Turns raw agent payloads into processed, display-ready threat events.
//! CORE STEP: validate -> extract -> classify severity -> assemble.
//!
//! ## Structure
//! - `types`: Payload, sub-records, processed event
//! - `severity`: Severity levels + presentation mapping
//! - `rules`: Severity table and reference descriptions
//! - `validator`: Required-field contract
//! - `extractor`: Sub-record projections
//! - `processor`: Processing pipeline
//! - `error`: Error types
//!
//! ## Usage
//! ```ignore
//! use threat_core::threat::{process_payload, Severity};
//!
//! let event = process_payload(&raw, Some("Acme"))?;
//! match event.severity {
//!     Severity::Critical => println!("Block"),
//!     _ => println!("Inform"),
//! }
//! ```

pub mod types;
pub mod severity;
pub mod rules;
pub mod validator;
pub mod extractor;
pub mod processor;
pub mod error;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use types::{
    ThreatEventPayload,
    DeviceInfo,
    BuildInfo,
    SecurityInfo,
    ThreatDetails,
    ThreatMessages,
    ThreatIdentifiers,
    ProcessedThreatEvent,
    ThreatSummary,
    PAYLOAD_FIELDS,
};

pub use severity::Severity;

pub use rules::{determine_severity, describe_threat_type, DEFAULT_SEVERITY};

pub use validator::{validate_payload, missing_required_fields, parse_payload, REQUIRED_FIELDS};

pub use extractor::{
    extract_device_info,
    extract_build_info,
    extract_security_info,
    extract_threat_details,
    extract_messages,
    extract_identifiers,
};

pub use processor::{
    process_payload,
    process_validated,
    parse_timestamp,
    format_user_message,
    format_messages,
    extract_support_ref,
    create_summary,
};

pub use error::{ThreatError, ThreatResult};
