use std::collections::BTreeSet;

use chrono::Utc;
use serde_json::{json, Map, Value};

use super::error::ThreatError;
use super::extractor::*;
use super::processor::{create_summary, process_payload};
use super::severity::Severity;
use super::types::{ThreatEventPayload, PAYLOAD_FIELDS};
use super::validator::{validate_payload, REQUIRED_FIELDS};

fn full_payload() -> Value {
    json!({
        "reasonCode": "7",
        "threatCode": "A7QJ3W",
        "externalID": "RootedDevice",
        "reasonData": "su binary found in /system/xbin",
        "deviceID": "a1b2c3d4",
        "deviceModel": "SM-S911B",
        "deviceManufacturer": "samsung",
        "deviceBrand": "samsung",
        "deviceBoard": "kalama",
        "osVersion": "14",
        "Arch": "arm64",
        "basebandVersion": "S911BXXU3BWK5",
        "carrierPlmn": "310260",
        "buildNumber": "UP1A.231005.007",
        "buildHost": "build-host-17",
        "buildUser": "dpi",
        "kernelInfo": "5.15.94-android14",
        "sdkVersion": "34",
        "isAAB": "true",
        "sandboxPath": "/data/user/0/com.acme.bank",
        "isSandboxPathWritable": "true",
        "isProcReadable": "false",
        "UID": "10245",
        "message": "{app_display_name} cannot run on rooted devices. Support REF: 9921",
        "defaultMessage": "Rooted device detected in {app_display_name}",
        "UUID": "0e5c7f7a-1c4e-4a51-9a53-1f0c5b1d1e01",
        "fusedAppToken": "fat-77",
        "timestamp": "1700000000",
        "rootingMethod": "magisk"
    })
}

fn without(field: &str) -> Value {
    let mut raw = full_payload();
    raw.as_object_mut().unwrap().remove(field);
    raw
}

#[test]
fn test_valid_payload_processes() {
    let event = process_payload(&full_payload(), None).unwrap();

    assert!(Severity::ALL.contains(&event.severity));
    assert_eq!(event.severity, Severity::Medium);
    assert_eq!(event.detected_at.timestamp(), 1_700_000_000);
    assert!(!event.resolved);
    assert_eq!(event.device_info.device_model, "SM-S911B");
    assert_eq!(event.threat_details.external_id, "RootedDevice");
    assert_eq!(event.identifiers.fused_app_token, "fat-77");
    // Unformatted without an app name
    assert!(event.messages.message.starts_with("{app_display_name}"));
}

#[test]
fn test_missing_required_field_fails_without_partial_result() {
    for field in REQUIRED_FIELDS {
        let result = process_payload(&without(field), Some("Acme"));
        match result {
            Err(ThreatError::InvalidPayload { missing }) => {
                assert_eq!(missing, vec![field.to_string()]);
            }
            other => panic!("{} missing should fail, got {:?}", field, other),
        }
    }
}

#[test]
fn test_missing_uuid() {
    let raw = without("UUID");
    assert!(!validate_payload(&raw));
    assert!(matches!(
        process_payload(&raw, None),
        Err(ThreatError::InvalidPayload { .. })
    ));
}

#[test]
fn test_null_required_values_still_process() {
    let mut raw = full_payload();
    raw["UUID"] = Value::Null;
    raw["message"] = Value::Null;
    assert!(validate_payload(&raw));

    let event = process_payload(&raw, Some("Acme")).unwrap();
    assert_eq!(event.identifiers.uuid, "");
    assert_eq!(event.messages.message, "");
    assert_eq!(event.payload.external_id, raw["externalID"].as_str().unwrap());
}

#[test]
fn test_optional_fields_may_be_absent() {
    let raw = json!({
        "reasonCode": "1",
        "threatCode": "XXXXXX",
        "externalID": "EmulatorFound",
        "deviceID": "d",
        "deviceModel": "sdk_gphone64",
        "timestamp": "1700000000",
        "UUID": "u",
        "message": "m"
    });

    let event = process_payload(&raw, Some("Acme")).unwrap();
    assert_eq!(event.build_info.build_number, "");
    assert_eq!(event.messages.default_message, "");
}

#[test]
fn test_extraction_is_partition_complete() {
    let payload: ThreatEventPayload = serde_json::from_value(full_payload()).unwrap();

    let parts = [
        serde_json::to_value(extract_device_info(&payload)).unwrap(),
        serde_json::to_value(extract_build_info(&payload)).unwrap(),
        serde_json::to_value(extract_security_info(&payload)).unwrap(),
        serde_json::to_value(extract_threat_details(&payload)).unwrap(),
        serde_json::to_value(extract_messages(&payload)).unwrap(),
        serde_json::to_value(extract_identifiers(&payload)).unwrap(),
    ];

    let mut merged = Map::new();
    let mut seen = 0;
    for part in parts {
        for (key, value) in part.as_object().unwrap() {
            seen += 1;
            assert!(merged.insert(key.clone(), value.clone()).is_none(), "{} duplicated", key);
        }
    }

    assert_eq!(seen, PAYLOAD_FIELDS.len());
    let keys: BTreeSet<&str> = merged.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = PAYLOAD_FIELDS.iter().copied().collect();
    assert_eq!(keys, expected);

    let original = full_payload();
    for field in PAYLOAD_FIELDS {
        assert_eq!(merged[field], original[field], "{} changed", field);
    }
}

#[test]
fn test_payload_round_trip_keeps_extras() {
    let payload: ThreatEventPayload = serde_json::from_value(full_payload()).unwrap();
    let exported = serde_json::to_value(&payload).unwrap();
    assert_eq!(exported, full_payload());
}

#[test]
fn test_app_name_formats_both_messages() {
    let event = process_payload(&full_payload(), Some("Acme")).unwrap();
    assert_eq!(
        event.messages.message,
        "Acme cannot run on rooted devices. Support REF: 9921"
    );
    assert_eq!(event.messages.default_message, "Rooted device detected in Acme");
    // The original payload is untouched
    assert!(event.payload.message.contains("{app_display_name}"));
}

#[test]
fn test_empty_app_name_leaves_messages() {
    let event = process_payload(&full_payload(), Some("")).unwrap();
    assert!(event.messages.message.contains("{app_display_name}"));
}

#[test]
fn test_bad_timestamp_is_not_fatal() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut raw = full_payload();
    raw["timestamp"] = json!("not-a-number");

    let before = Utc::now();
    let event = process_payload(&raw, None).unwrap();
    let after = Utc::now();

    assert!(event.detected_at >= before && event.detected_at <= after);
    assert_eq!(event.identifiers.timestamp, "not-a-number");
}

#[test]
fn test_unknown_threat_code_is_medium() {
    let mut raw = full_payload();
    raw["threatCode"] = json!("Q9Q9Q9");
    assert_eq!(process_payload(&raw, None).unwrap().severity, Severity::Medium);
}

#[test]
fn test_summary() {
    let event = process_payload(&full_payload(), None).unwrap();
    let summary = create_summary(&event);

    assert_eq!(summary.title, "RootedDevice");
    assert_eq!(summary.description, "su binary found in /system/xbin");
    assert_eq!(summary.device_info, "samsung SM-S911B");
    assert_eq!(summary.timestamp, "2023-11-14 22:13:20 UTC");
    assert_eq!(summary.severity, Severity::Medium);
}
