//! Event Type Identifier
//!
//! Opaque key (`externalID`) the registry dispatches on. Open-ended:
//! values outside the known constants are ordinary input.

use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventType(Cow<'static, str>);

impl EventType {
    pub const ROOTED_DEVICE: EventType = EventType::known("RootedDevice");
    pub const UNKNOWN_SOURCES_ENABLED: EventType = EventType::known("UnknownSourcesEnabled");
    pub const SSL_CERTIFICATE_VALIDATION_FAILED: EventType =
        EventType::known("SslCertificateValidationFailed");
    pub const SSL_NON_SSL_CONNECTION: EventType = EventType::known("SslNonSslConnection");
    pub const SSL_INCOMPATIBLE_VERSION: EventType = EventType::known("SslIncompatibleVersion");
    pub const NETWORK_PROXY_CONFIGURED: EventType = EventType::known("NetworkProxyConfigured");
    pub const DEBUGGER_THREAT_DETECTED: EventType = EventType::known("DebuggerThreatDetected");
    pub const APP_IS_DEBUGGABLE: EventType = EventType::known("AppIsDebuggable");
    pub const APP_INTEGRITY_ERROR: EventType = EventType::known("AppIntegrityError");
    pub const EMULATOR_FOUND: EventType = EventType::known("EmulatorFound");
    pub const GOOGLE_EMULATOR_DETECTED: EventType = EventType::known("GoogleEmulatorDetected");
    /// Catalogued but not registered by default
    pub const DEVELOPER_OPTIONS_ENABLED: EventType = EventType::known("DeveloperOptionsEnabled");

    const fn known(id: &'static str) -> Self {
        EventType(Cow::Borrowed(id))
    }

    pub fn new(id: impl Into<String>) -> Self {
        EventType(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EventType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EventType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventType {
    fn from(id: &str) -> Self {
        EventType::new(id)
    }
}

impl From<String> for EventType {
    fn from(id: String) -> Self {
        EventType::new(id)
    }
}

impl PartialEq<str> for EventType {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for EventType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_known_and_owned_compare_equal() {
        assert_eq!(EventType::ROOTED_DEVICE, EventType::from("RootedDevice"));
        assert_eq!(EventType::APP_INTEGRITY_ERROR, "AppIntegrityError");
    }

    #[test]
    fn test_str_lookup_in_map() {
        let mut map = HashMap::new();
        map.insert(EventType::EMULATOR_FOUND, 1);
        assert_eq!(map.get("EmulatorFound"), Some(&1));
        assert_eq!(map.get("emulatorfound"), None);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&EventType::SSL_NON_SSL_CONNECTION).unwrap();
        assert_eq!(json, "\"SslNonSslConnection\"");
        let parsed: EventType = serde_json::from_str("\"SomeFutureThreatType\"").unwrap();
        assert_eq!(parsed.as_str(), "SomeFutureThreatType");
    }
}
