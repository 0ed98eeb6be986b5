use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;

use super::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct MockAgent {
    protected: bool,
    fail_init: bool,
    checks: AtomicUsize,
}

impl MockAgent {
    fn new(protected: bool) -> Self {
        Self {
            protected,
            fail_init: false,
            checks: AtomicUsize::new(0),
        }
    }
}

impl ThreatAgent for MockAgent {
    fn initialize(&self) -> anyhow::Result<bool> {
        if self.fail_init {
            anyhow::bail!("native module missing");
        }
        Ok(self.protected)
    }

    fn config(&self) -> anyhow::Result<AgentConfig> {
        Ok(AgentConfig {
            is_protected: self.protected,
            version: "5.2.1".to_string(),
            enabled_features: vec!["root".to_string(), "ssl".to_string()],
        })
    }

    fn trigger_threat_check(&self) -> anyhow::Result<()> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[test]
fn test_initialize_with_protected_agent() {
    let bridge = ThreatEventBridge::new(Some(Arc::new(MockAgent::new(true))));
    assert!(!bridge.is_protected());
    assert!(bridge.initialize());
    assert!(bridge.is_protected());
    assert_eq!(bridge.agent_config().unwrap().version, "5.2.1");
}

#[test]
fn test_initialize_failures_mean_unprotected() {
    init_logging();
    let detached = ThreatEventBridge::detached();
    assert!(!detached.initialize());
    assert!(!detached.is_protected());

    let inactive = ThreatEventBridge::new(Some(Arc::new(MockAgent::new(false))));
    assert!(!inactive.initialize());
    assert!(inactive.agent_config().is_none());

    let mut broken = MockAgent::new(true);
    broken.fail_init = true;
    let broken = ThreatEventBridge::new(Some(Arc::new(broken)));
    assert!(!broken.initialize());
    assert!(!broken.is_protected());
}

#[test]
fn test_trigger_threat_check() {
    let agent = Arc::new(MockAgent::new(true));
    let bridge = ThreatEventBridge::new(Some(agent.clone()));
    bridge.trigger_threat_check().unwrap();
    bridge.trigger_threat_check().unwrap();
    assert_eq!(agent.checks.load(Ordering::SeqCst), 2);

    assert!(ThreatEventBridge::detached().trigger_threat_check().is_ok());
}

#[test]
fn test_listeners_receive_normalized_payload() {
    let bridge = ThreatEventBridge::detached();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = seen.clone();
    bridge.add_listener(move |payload| {
        sink.lock().push(payload.external_id.clone());
        Ok(())
    });

    let delivered = bridge.handle_native_event(&json!({ "threatType": "GoogleEmulatorDetected" }));
    assert_eq!(delivered, 1);
    assert_eq!(*seen.lock(), vec!["GoogleEmulatorDetected".to_string()]);
}

#[test]
fn test_failing_listeners_are_isolated() {
    init_logging();
    let bridge = ThreatEventBridge::detached();
    let calls = Arc::new(AtomicUsize::new(0));

    bridge.add_listener(|_| anyhow::bail!("display layer crashed"));
    bridge.add_listener(|_| panic!("listener bug"));
    let counter = calls.clone();
    bridge.add_listener(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let delivered = bridge.handle_native_event(&json!({ "externalID": "RootedDevice" }));
    assert_eq!(delivered, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(bridge.listener_count(), 3);

    // Still usable afterwards
    assert_eq!(bridge.handle_native_event(&json!({})), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_remove_listener_and_destroy() {
    let bridge = ThreatEventBridge::new(Some(Arc::new(MockAgent::new(true))));
    bridge.initialize();

    let first = bridge.add_listener(|_| Ok(()));
    let second = bridge.add_listener(|_| Ok(()));
    assert_ne!(first, second);

    assert!(bridge.remove_listener(first));
    assert!(!bridge.remove_listener(first));
    assert_eq!(bridge.listener_count(), 1);
    assert_eq!(bridge.handle_native_event(&json!({})), 1);

    bridge.destroy();
    assert_eq!(bridge.listener_count(), 0);
    assert!(!bridge.is_protected());
    assert_eq!(bridge.handle_native_event(&json!({})), 0);
}

#[test]
fn test_non_object_input_delivers_nothing() {
    let bridge = ThreatEventBridge::detached();
    bridge.add_listener(|_| Ok(()));
    assert_eq!(bridge.handle_native_event(&json!("RootedDevice")), 0);
    assert_eq!(bridge.handle_native_event(&json!([1, 2, 3])), 0);
    assert_eq!(bridge.handle_native_event(&json!(null)), 0);
}
