//! Threat Event Types
//!
//! Payload as delivered by the monitoring agent, the six derived
//! sub-records, and the processed event handed to display layers.
//! Data structures only - no processing logic.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::severity::Severity;

/// Every known payload key, in agent wire spelling
pub const PAYLOAD_FIELDS: [&str; 28] = [
    "reasonCode",
    "threatCode",
    "externalID",
    "reasonData",
    "deviceID",
    "deviceModel",
    "deviceManufacturer",
    "deviceBrand",
    "deviceBoard",
    "osVersion",
    "Arch",
    "basebandVersion",
    "carrierPlmn",
    "buildNumber",
    "buildHost",
    "buildUser",
    "kernelInfo",
    "sdkVersion",
    "isAAB",
    "sandboxPath",
    "isSandboxPathWritable",
    "isProcReadable",
    "UID",
    "message",
    "defaultMessage",
    "UUID",
    "fusedAppToken",
    "timestamp",
];

// ============================================================================
// RAW PAYLOAD (from monitoring agent)
// ============================================================================

/// Flat threat event record. Every field is opaque text, including the
/// numeric-looking ones; only `timestamp` and `threatCode` are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThreatEventPayload {
    // Threat identification
    #[serde(deserialize_with = "lenient_text")]
    pub reason_code: String,
    #[serde(deserialize_with = "lenient_text")]
    pub threat_code: String,
    #[serde(rename = "externalID", deserialize_with = "lenient_text")]
    pub external_id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub reason_data: String,

    // Device information
    #[serde(rename = "deviceID", deserialize_with = "lenient_text")]
    pub device_id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub device_model: String,
    #[serde(deserialize_with = "lenient_text")]
    pub device_manufacturer: String,
    #[serde(deserialize_with = "lenient_text")]
    pub device_brand: String,
    #[serde(deserialize_with = "lenient_text")]
    pub device_board: String,
    #[serde(deserialize_with = "lenient_text")]
    pub os_version: String,
    #[serde(rename = "Arch", deserialize_with = "lenient_text")]
    pub arch: String,
    #[serde(deserialize_with = "lenient_text")]
    pub baseband_version: String,
    #[serde(deserialize_with = "lenient_text")]
    pub carrier_plmn: String,

    // Build and system info
    #[serde(deserialize_with = "lenient_text")]
    pub build_number: String,
    #[serde(deserialize_with = "lenient_text")]
    pub build_host: String,
    #[serde(deserialize_with = "lenient_text")]
    pub build_user: String,
    #[serde(deserialize_with = "lenient_text")]
    pub kernel_info: String,
    #[serde(deserialize_with = "lenient_text")]
    pub sdk_version: String,
    #[serde(rename = "isAAB", deserialize_with = "lenient_text")]
    pub is_aab: String,

    // Security and sandbox info
    #[serde(deserialize_with = "lenient_text")]
    pub sandbox_path: String,
    #[serde(deserialize_with = "lenient_text")]
    pub is_sandbox_path_writable: String,
    #[serde(deserialize_with = "lenient_text")]
    pub is_proc_readable: String,
    #[serde(rename = "UID", deserialize_with = "lenient_text")]
    pub uid: String,

    // Messages
    #[serde(deserialize_with = "lenient_text")]
    pub message: String,
    #[serde(deserialize_with = "lenient_text")]
    pub default_message: String,

    // Identifiers and timing
    #[serde(rename = "UUID", deserialize_with = "lenient_text")]
    pub uuid: String,
    #[serde(deserialize_with = "lenient_text")]
    pub fused_app_token: String,
    #[serde(deserialize_with = "lenient_text")]
    pub timestamp: String,

    /// Threat-specific extras (rootingMethod, serverHost, ...) kept for export
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Text form of a JSON value as the agent would have stringified it
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

// ============================================================================
// SUB-RECORDS (derived, never created independently)
// ============================================================================

/// Device information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    /// e.g. "SM-S911B"
    pub device_model: String,
    pub device_manufacturer: String,
    pub device_brand: String,
    pub device_board: String,
    pub os_version: String,
    /// e.g. "arm64"
    #[serde(rename = "Arch")]
    pub arch: String,
    pub baseband_version: String,
    pub carrier_plmn: String,
}

/// Build and system information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub build_number: String,
    pub build_host: String,
    pub build_user: String,
    pub kernel_info: String,
    pub sdk_version: String,
    /// Android App Bundle flag ("true"/"false")
    #[serde(rename = "isAAB")]
    pub is_aab: String,
}

/// Application sandbox and security information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityInfo {
    pub sandbox_path: String,
    pub is_sandbox_path_writable: String,
    pub is_proc_readable: String,
    #[serde(rename = "UID")]
    pub uid: String,
}

/// Threat identification and classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatDetails {
    /// Numeric reason code
    pub reason_code: String,
    /// Alphanumeric code, input of the severity table
    pub threat_code: String,
    /// Event type identifier, input of the handler registry
    #[serde(rename = "externalID")]
    pub external_id: String,
    /// Human-readable explanation
    pub reason_data: String,
}

/// User-facing messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatMessages {
    pub message: String,
    pub default_message: String,
}

/// Identifiers and timing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatIdentifiers {
    #[serde(rename = "UUID")]
    pub uuid: String,
    pub fused_app_token: String,
    /// Unix seconds, as text
    pub timestamp: String,
}

// ============================================================================
// PROCESSED EVENT
// ============================================================================

/// Output of the processor. `resolved` is always false at creation and is
/// only flipped by the consuming display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedThreatEvent {
    /// Original payload
    pub payload: ThreatEventPayload,
    pub device_info: DeviceInfo,
    pub build_info: BuildInfo,
    pub security_info: SecurityInfo,
    pub threat_details: ThreatDetails,
    pub messages: ThreatMessages,
    pub identifiers: ThreatIdentifiers,
    /// From the threat-code table
    pub severity: Severity,
    pub detected_at: DateTime<Utc>,
    pub resolved: bool,
}

/// One-line summary for list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatSummary {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub timestamp: String,
    pub device_info: String,
}
