//! Threat Event Processor
//!
//! CHỈ chứa pipeline logic - validate, extract, classify, assemble.
//! Input: raw agent record (+ optional app display name)
//! Output: ProcessedThreatEvent

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::error::ThreatResult;
use super::extractor::{
    extract_build_info, extract_device_info, extract_identifiers, extract_messages,
    extract_security_info, extract_threat_details,
};
use super::rules::{describe_threat_type, determine_severity};
use super::types::{ProcessedThreatEvent, ThreatEventPayload, ThreatMessages, ThreatSummary};
use super::validator::parse_payload;
use crate::constants::{APP_NAME_PLACEHOLDER, DEFAULT_APP_NAME};

static SUPPORT_REF: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)Support REF:\s*(\d+)").ok());

// ============================================================================
// MAIN PROCESSING FUNCTION
// ============================================================================

/// Process a raw record from the agent.
///
/// Fails only when required fields are missing; no partial event is
/// produced in that case.
pub fn process_payload(raw: &Value, app_name: Option<&str>) -> ThreatResult<ProcessedThreatEvent> {
    let payload = parse_payload(raw)?;
    Ok(process_validated(payload, app_name))
}

/// Process an already typed payload. Typed payloads carry every field,
/// so this step cannot fail.
pub fn process_validated(payload: ThreatEventPayload, app_name: Option<&str>) -> ProcessedThreatEvent {
    let device_info = extract_device_info(&payload);
    let build_info = extract_build_info(&payload);
    let security_info = extract_security_info(&payload);
    let threat_details = extract_threat_details(&payload);
    let mut messages = extract_messages(&payload);
    let identifiers = extract_identifiers(&payload);

    let severity = determine_severity(&payload.threat_code);
    let detected_at = parse_timestamp(&payload.timestamp);

    if let Some(name) = app_name.filter(|n| !n.is_empty()) {
        messages.message = format_user_message(&messages.message, name);
        messages.default_message = format_user_message(&messages.default_message, name);
    }

    ProcessedThreatEvent {
        payload,
        device_info,
        build_info,
        security_info,
        threat_details,
        messages,
        identifiers,
        severity,
        detected_at,
        resolved: false,
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Unix seconds (decimal text) to an instant. Leading whitespace and a
/// sign are accepted and parsing stops at the first non-digit. Anything
/// unparseable or out of range yields the current time.
pub fn parse_timestamp(timestamp: &str) -> DateTime<Utc> {
    match leading_integer(timestamp).and_then(|secs| DateTime::from_timestamp(secs, 0)) {
        Some(instant) => instant,
        None => {
            log::warn!("Invalid timestamp '{}' provided, using current time", timestamp);
            Utc::now()
        }
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Replace every `{app_display_name}` in `message` with `app_name`
pub fn format_user_message(message: &str, app_name: &str) -> String {
    message.replace(APP_NAME_PLACEHOLDER, app_name)
}

/// Both messages formatted for display; `DEFAULT_APP_NAME` stands in
/// when the host has no display name
pub fn format_messages(messages: &ThreatMessages, app_name: Option<&str>) -> ThreatMessages {
    let name = app_name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_APP_NAME);
    ThreatMessages {
        message: format_user_message(&messages.message, name),
        default_message: format_user_message(&messages.default_message, name),
    }
}

/// Support reference number quoted in an agent message ("Support REF: 1234")
pub fn extract_support_ref(message: &str) -> Option<String> {
    SUPPORT_REF
        .as_ref()?
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Quick summary for list views
pub fn create_summary(event: &ProcessedThreatEvent) -> ThreatSummary {
    ThreatSummary {
        title: describe_threat_type(&event.threat_details.external_id),
        description: event.threat_details.reason_data.clone(),
        severity: event.severity,
        timestamp: event.detected_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        device_info: format!(
            "{} {}",
            event.device_info.device_manufacturer, event.device_info.device_model
        ),
    }
}

// ============================================================================
// TESTS
// ============================================================================
