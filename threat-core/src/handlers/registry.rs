//! Threat Handler Registry
//!
//! Total mapping from event type to handler factory. Populated from the
//! catalog on construction, extended by the host during setup, then
//! shared read-only (typically behind an `Arc`).

use std::collections::HashMap;
use std::sync::Arc;

use super::catalog;
use super::event_type::EventType;
use super::handler::ThreatHandler;
use crate::threat::ThreatEventPayload;

/// Builds a fresh handler for one event type
pub type HandlerFactory = Arc<dyn Fn() -> ThreatHandler + Send + Sync>;

pub struct ThreatHandlerRegistry {
    factories: HashMap<EventType, HandlerFactory>,
}

impl ThreatHandlerRegistry {
    /// Registry with every builtin catalog entry registered
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for entry in catalog::builtin_entries() {
            if let Some(event_type) = &entry.event_type {
                registry.register(event_type.clone(), move || ThreatHandler::from_entry(entry));
            }
        }
        log::debug!("Handler registry initialized with {} builtin types", registry.len());
        registry
    }

    /// Registry without builtins; every lookup hits the fallback
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Insert or overwrite (last write wins)
    pub fn register<F>(&mut self, event_type: impl Into<EventType>, factory: F)
    where
        F: Fn() -> ThreatHandler + Send + Sync + 'static,
    {
        let event_type = event_type.into();
        if self.factories.contains_key(&event_type) {
            log::debug!("Overriding handler for event type {}", event_type);
        }
        self.factories.insert(event_type, Arc::new(factory));
    }

    /// Register a ready-made descriptor, keyed by its own event type.
    /// Fallback descriptors (no event type) are ignored.
    pub fn register_handler(&mut self, handler: ThreatHandler) -> bool {
        let Some(event_type) = handler.event_type.clone() else {
            log::warn!("Refusing to register fallback handler '{}' under a key", handler.title);
            return false;
        };
        self.register(event_type, move || handler.clone());
        true
    }

    // ========================================================================
    // LOOKUP (total)
    // ========================================================================

    /// Handler for `payload.externalID`, fallback when unregistered
    pub fn create_handler(&self, payload: &ThreatEventPayload) -> ThreatHandler {
        self.create_handler_for(&payload.external_id)
    }

    pub fn create_handler_for(&self, event_type: &str) -> ThreatHandler {
        match self.factories.get(event_type) {
            Some(factory) => factory(),
            None => catalog::fallback(),
        }
    }

    // ========================================================================
    // INTROSPECTION
    // ========================================================================

    /// Registered types, sorted
    pub fn supported_types(&self) -> Vec<EventType> {
        let mut types: Vec<EventType> = self.factories.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn is_supported(&self, event_type: &str) -> bool {
        self.factories.contains_key(event_type)
    }

    pub fn handler_factory(&self, event_type: &str) -> Option<HandlerFactory> {
        self.factories.get(event_type).cloned()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for ThreatHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ThreatHandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreatHandlerRegistry")
            .field("supported_types", &self.supported_types())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threat::Severity;

    fn payload(external_id: &str) -> ThreatEventPayload {
        ThreatEventPayload {
            external_id: external_id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_builtins_registered() {
        let registry = ThreatHandlerRegistry::new();
        assert_eq!(registry.len(), 11);
        assert!(registry.is_supported("RootedDevice"));
        assert!(registry.is_supported("GoogleEmulatorDetected"));
        assert!(!registry.is_supported("DeveloperOptionsEnabled"));
    }

    #[test]
    fn test_app_integrity_error_is_critical() {
        let registry = ThreatHandlerRegistry::new();
        let handler = registry.create_handler(&payload("AppIntegrityError"));
        assert_eq!(handler.severity(), Severity::Critical);
        assert_eq!(handler.title(), "App Integrity Compromised");
        assert!(handler.can_handle(&payload("AppIntegrityError")));
    }

    #[test]
    fn test_unknown_type_gets_fallback() {
        let registry = ThreatHandlerRegistry::new();
        let handler = registry.create_handler(&payload("SomeFutureThreatType"));
        assert!(handler.is_fallback());
        assert_eq!(handler.severity(), Severity::Medium);
        assert_eq!(handler.title(), "Security Threat Detected");
        assert!(!registry.is_supported("SomeFutureThreatType"));
    }

    #[test]
    fn test_lookup_is_total() {
        let registry = ThreatHandlerRegistry::new();
        let inputs = [
            "",
            " ",
            "rooteddevice",
            "RootedDevice ",
            "\0",
            "'; DROP TABLE threats; --",
            "🔥🔥🔥",
            "__proto__",
            "constructor",
        ];
        for input in inputs {
            assert!(registry.create_handler(&payload(input)).is_fallback(), "{:?}", input);
        }

        let empty = ThreatHandlerRegistry::empty();
        assert!(empty.is_empty());
        assert!(empty.create_handler(&payload("RootedDevice")).is_fallback());
    }

    #[test]
    fn test_register_last_write_wins() {
        let mut registry = ThreatHandlerRegistry::new();
        registry.register(EventType::EMULATOR_FOUND, || {
            ThreatHandler::new(Some(EventType::EMULATOR_FOUND), Severity::High, "Emulators blocked")
        });
        registry.register(EventType::EMULATOR_FOUND, || {
            ThreatHandler::new(Some(EventType::EMULATOR_FOUND), Severity::Critical, "Emulators banned")
        });

        let handler = registry.create_handler_for("EmulatorFound");
        assert_eq!(handler.title(), "Emulators banned");
        assert_eq!(registry.len(), 11);
    }

    #[test]
    fn test_register_new_type_and_descriptor() {
        let mut registry = ThreatHandlerRegistry::new();
        assert!(registry.register_handler(catalog::developer_options_enabled()));
        assert!(!registry.register_handler(catalog::fallback()));

        assert!(registry.is_supported("DeveloperOptionsEnabled"));
        assert_eq!(
            registry.create_handler_for("DeveloperOptionsEnabled").title(),
            "Developer Options Enabled"
        );
        assert_eq!(registry.len(), 12);
    }

    #[test]
    fn test_introspection_does_not_mutate() {
        let registry = ThreatHandlerRegistry::new();
        let before = registry.supported_types();
        let _ = registry.is_supported("Unknown");
        let _ = registry.create_handler_for("Unknown");
        assert_eq!(registry.supported_types(), before);
        assert!(before.windows(2).all(|w| w[0] <= w[1]));
        assert!(registry.handler_factory("Unknown").is_none());
        assert!(registry.handler_factory("RootedDevice").is_some());
    }

    #[test]
    fn test_factory_builds_fresh_values() {
        let registry = ThreatHandlerRegistry::new();
        let factory = registry.handler_factory("RootedDevice").unwrap();
        assert_eq!(factory(), factory());
        assert_eq!(factory().title(), "Rooted Device Detected");
    }

    #[test]
    fn test_registry_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ThreatHandlerRegistry>();
        assert_send_sync::<ThreatHandler>();
    }

    #[test]
    fn test_concurrent_lookups() {
        let registry = Arc::new(ThreatHandlerRegistry::new());

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let known = registry.create_handler(&payload("RootedDevice"));
                    let unknown = registry.create_handler(&payload(&format!("FutureThreat{}", i)));
                    (known.title().to_string(), unknown.is_fallback())
                })
            })
            .collect();

        for worker in workers {
            let (title, fallback) = worker.join().unwrap();
            assert_eq!(title, "Rooted Device Detected");
            assert!(fallback);
        }
        assert_eq!(registry.len(), 11);
    }
}
