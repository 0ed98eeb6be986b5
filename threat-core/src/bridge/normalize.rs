//! Native Record Normalization
//!
//! Fills the fields a native record left out so the result is a complete
//! payload. Keys the agent did supply win over every default, extra keys
//! are carried through untouched.

use chrono::Utc;
use serde_json::{Map, Value};

use crate::constants::UNKNOWN_VALUE;
use crate::threat::types::value_to_text;
use crate::threat::{ThreatEventPayload, ThreatResult, PAYLOAD_FIELDS};

const DEFAULT_MESSAGE: &str = "Threat detected";
const DEFAULT_SECURITY_MESSAGE: &str = "Security threat detected";
const NO_CARRIER_DATA: &str = "no data";

/// Normalize one native record into a full payload
pub fn normalize_native(raw: &Map<String, Value>) -> ThreatResult<ThreatEventPayload> {
    let mut merged = Map::with_capacity(PAYLOAD_FIELDS.len() + raw.len());
    for field in PAYLOAD_FIELDS {
        merged.insert(field.to_string(), Value::String(default_for(field, raw)));
    }

    for (key, value) in raw {
        if !value.is_null() {
            merged.insert(key.clone(), value.clone());
        }
    }

    let payload = serde_json::from_value(Value::Object(merged))?;
    Ok(payload)
}

fn default_for(field: &str, raw: &Map<String, Value>) -> String {
    match field {
        "reasonCode" | "deviceID" => UNKNOWN_VALUE.to_string(),
        "externalID" => supplied(raw, "threatType").unwrap_or_else(|| UNKNOWN_VALUE.to_string()),
        "isProcReadable" | "isAAB" | "isSandboxPathWritable" => "false".to_string(),
        "carrierPlmn" => NO_CARRIER_DATA.to_string(),
        "message" => {
            supplied(raw, "defaultMessage").unwrap_or_else(|| DEFAULT_MESSAGE.to_string())
        }
        "defaultMessage" => DEFAULT_SECURITY_MESSAGE.to_string(),
        "timestamp" => Utc::now().timestamp().to_string(),
        _ => String::new(),
    }
}

/// Non-empty text of `key`, if the agent sent one
fn supplied(raw: &Map<String, Value>, key: &str) -> Option<String> {
    raw.get(key).map(value_to_text).filter(|text| !text.is_empty())
}
