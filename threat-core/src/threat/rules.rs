//! Threat Severity Rules & Reference Data
//!
//! Threat-code severity table and event-type descriptions.
//! Append-only reference data; unknown keys fall back, they never fail.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::severity::Severity;

/// Severity for threat codes the table does not know
pub const DEFAULT_SEVERITY: Severity = Severity::Medium;

// ============================================================================
// SEVERITY TABLE (threat code -> severity)
// ============================================================================

/// Known threat codes. Sparse on purpose: add codes as they are catalogued.
static THREAT_SEVERITY_TABLE: Lazy<HashMap<&'static str, Severity>> = Lazy::new(|| {
    HashMap::from([
        // Developer Options Enabled
        ("A7QJ3W", Severity::Medium),
    ])
});

/// Severity for a threat code, `DEFAULT_SEVERITY` when unknown
pub fn determine_severity(threat_code: &str) -> Severity {
    THREAT_SEVERITY_TABLE
        .get(threat_code)
        .copied()
        .unwrap_or(DEFAULT_SEVERITY)
}

// ============================================================================
// EVENT TYPE DESCRIPTIONS
// ============================================================================

static THREAT_TYPE_DESCRIPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("DeveloperOptionsEnabled", "Developer options are enabled on the device"),
    ])
});

/// Short description of an event type; the identifier itself when unknown
pub fn describe_threat_type(external_id: &str) -> String {
    THREAT_TYPE_DESCRIPTIONS
        .get(external_id)
        .map(|d| d.to_string())
        .unwrap_or_else(|| external_id.to_string())
}

// ============================================================================
// TESTS
// ============================================================================
