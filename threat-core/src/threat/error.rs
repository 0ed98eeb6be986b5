//! Threat processing errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThreatError {
    /// Required fields are absent; nothing was processed
    #[error("Invalid threat event payload structure: missing {}", .missing.join(", "))]
    InvalidPayload { missing: Vec<String> },

    /// Typed decode failure. Payload fields decode leniently, so JSON
    /// objects never produce this; non-object input is caught earlier.
    #[error("Invalid threat event payload structure: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ThreatError {
    pub fn missing(fields: &[&str]) -> Self {
        ThreatError::InvalidPayload {
            missing: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

pub type ThreatResult<T> = Result<T, ThreatError>;
