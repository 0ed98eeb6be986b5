//! Bridge Module
//!
//! Delivery channel between the native monitoring agent and in-process
//! consumers (monitor, display layers).
//!
//! ## Structure
//! - `agent`: `ThreatAgent` seam + agent config
//! - `normalize`: Native record -> complete payload
//! - `emitter`: Listener registry and fan-out
//!
//! ## Usage
//! ```ignore
//! let bridge = ThreatEventBridge::new(Some(Arc::new(MyAgent)));
//! bridge.initialize();
//! let sub = bridge.add_listener(|payload| {
//!     println!("{}", payload.external_id);
//!     Ok(())
//! });
//! bridge.handle_native_event(&native_json);
//! bridge.remove_listener(sub);
//! ```

pub mod agent;
pub mod normalize;
pub mod emitter;

#[cfg(test)]
mod tests;

pub use agent::{AgentConfig, ThreatAgent};
pub use normalize::normalize_native;
pub use emitter::{Subscription, ThreatEventBridge, ThreatListener};
