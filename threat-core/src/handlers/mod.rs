//! Handlers Module
//!
//! Per-event-type guidance: which severity, what to tell the user and
//! which remediation steps to offer.
//!
//! ## Structure
//! - `event_type`: Open identifier newtype + known constants
//! - `handler`: Immutable handler descriptor
//! - `catalog`: Static descriptor table (11 builtin + optional + fallback)
//! - `registry`: Total type-to-handler lookup
//!
//! ## Usage
//! ```ignore
//! use threat_core::handlers::{catalog, ThreatHandlerRegistry};
//!
//! let mut registry = ThreatHandlerRegistry::new();
//! registry.register_handler(catalog::developer_options_enabled());
//! let handler = registry.create_handler_for("SomeFutureThreatType"); // fallback
//! ```

pub mod event_type;
pub mod handler;
pub mod catalog;
pub mod registry;

pub use event_type::EventType;
pub use handler::ThreatHandler;
pub use catalog::{builtin_handlers, developer_options_enabled, fallback, CatalogEntry};
pub use registry::{HandlerFactory, ThreatHandlerRegistry};
