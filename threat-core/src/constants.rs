//! Central Configuration Constants
//!
//! Single source of truth for defaults shared by the engine and its hosts.

/// Placeholder the agent embeds in user-facing messages
pub const APP_NAME_PLACEHOLDER: &str = "{app_display_name}";

/// App name used by `format_user_message` when the host has none
pub const DEFAULT_APP_NAME: &str = "This app";

/// Value the bridge assigns to unidentified reason codes, devices and types
pub const UNKNOWN_VALUE: &str = "UNKNOWN";

/// Number of processed events kept by the monitor (newest first)
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Delay before low-severity alerts are dismissed (milliseconds)
pub const DEFAULT_AUTO_DISMISS_DELAY_MS: u64 = 10_000;

/// Library version
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Environment variable names
// ============================================

pub const ENV_APP_DISPLAY_NAME: &str = "THREAT_APP_DISPLAY_NAME";
pub const ENV_HISTORY_LIMIT: &str = "THREAT_HISTORY_LIMIT";
pub const ENV_AUTO_DISMISS_LOW: &str = "THREAT_AUTO_DISMISS_LOW";
pub const ENV_AUTO_DISMISS_DELAY_MS: &str = "THREAT_AUTO_DISMISS_DELAY_MS";
