//! Payload Validator
//!
//! Minimal presence contract for inbound records. Values are not
//! type- or format-checked here.

use serde_json::Value;

use super::error::{ThreatError, ThreatResult};
use super::types::ThreatEventPayload;

/// Keys that must be present and defined on every inbound record
pub const REQUIRED_FIELDS: [&str; 8] = [
    "reasonCode",
    "threatCode",
    "externalID",
    "deviceID",
    "deviceModel",
    "timestamp",
    "UUID",
    "message",
];

/// True iff `raw` is an object carrying every required key. A `null`
/// value still counts as present.
pub fn validate_payload(raw: &Value) -> bool {
    match raw.as_object() {
        Some(obj) => REQUIRED_FIELDS.iter().all(|field| obj.contains_key(*field)),
        None => false,
    }
}

/// Required keys absent from `raw` (all of them if `raw` is not an object)
pub fn missing_required_fields(raw: &Value) -> Vec<&'static str> {
    match raw.as_object() {
        Some(obj) => REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !obj.contains_key(*field))
            .collect(),
        None => REQUIRED_FIELDS.to_vec(),
    }
}

/// Validate then convert into a typed payload
pub fn parse_payload(raw: &Value) -> ThreatResult<ThreatEventPayload> {
    let missing = missing_required_fields(raw);
    if !missing.is_empty() {
        return Err(ThreatError::missing(&missing));
    }

    Ok(serde_json::from_value(raw.clone())?)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "reasonCode": "12",
            "threatCode": "A7QJ3W",
            "externalID": "RootedDevice",
            "deviceID": "dev-1",
            "deviceModel": "Pixel 8",
            "timestamp": "1700000000",
            "UUID": "uuid-1",
            "message": "Rooted"
        })
    }

    #[test]
    fn test_minimal_payload_is_valid() {
        assert!(validate_payload(&minimal()));
        assert!(missing_required_fields(&minimal()).is_empty());
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        for field in REQUIRED_FIELDS {
            let mut raw = minimal();
            raw.as_object_mut().unwrap().remove(field);
            assert!(!validate_payload(&raw), "{} should be required", field);
            assert_eq!(missing_required_fields(&raw), vec![field]);
        }
    }

    #[test]
    fn test_null_value_counts_as_present() {
        let mut raw = minimal();
        raw["UUID"] = Value::Null;
        assert!(validate_payload(&raw));
        assert!(missing_required_fields(&raw).is_empty());

        let payload = parse_payload(&raw).unwrap();
        assert_eq!(payload.uuid, "");
    }

    #[test]
    fn test_values_are_not_type_checked() {
        let mut raw = minimal();
        raw["timestamp"] = json!(1700000000);
        raw["message"] = json!("");
        assert!(validate_payload(&raw));
    }

    #[test]
    fn test_non_object_input() {
        assert!(!validate_payload(&json!(null)));
        assert!(!validate_payload(&json!(["reasonCode"])));
        assert_eq!(missing_required_fields(&json!("text")).len(), 8);
    }

    #[test]
    fn test_parse_payload_reports_missing() {
        let mut raw = minimal();
        raw.as_object_mut().unwrap().remove("deviceModel");

        match parse_payload(&raw) {
            Err(ThreatError::InvalidPayload { missing }) => {
                assert_eq!(missing, vec!["deviceModel".to_string()]);
            }
            other => panic!("Expected InvalidPayload, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_payload_is_lenient_on_types() {
        let mut raw = minimal();
        raw["timestamp"] = json!(1700000000);
        raw["isAAB"] = json!(true);
        raw["rootingMethod"] = json!("magisk");

        let payload = parse_payload(&raw).unwrap();
        assert_eq!(payload.timestamp, "1700000000");
        assert_eq!(payload.is_aab, "true");
        assert_eq!(payload.device_brand, "");
        assert_eq!(payload.extra.get("rootingMethod"), Some(&json!("magisk")));
    }
}
