//! Monitor Configuration
//!
//! Runtime settings for the threat monitor, read from the environment
//! with fallback to the defaults in `constants`.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AUTO_DISMISS_DELAY_MS, DEFAULT_HISTORY_LIMIT, ENV_APP_DISPLAY_NAME,
    ENV_AUTO_DISMISS_DELAY_MS, ENV_AUTO_DISMISS_LOW, ENV_HISTORY_LIMIT,
};

/// Settings consumed by `ThreatMonitor`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Substituted for `{app_display_name}` in agent messages
    pub app_display_name: Option<String>,
    /// Max events kept in history
    pub history_limit: usize,
    /// Dismiss low-severity alerts automatically
    pub auto_dismiss_low: bool,
    /// Delay before a low-severity alert is dismissed
    pub auto_dismiss_delay_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            app_display_name: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            auto_dismiss_low: true,
            auto_dismiss_delay_ms: DEFAULT_AUTO_DISMISS_DELAY_MS,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            app_display_name: lookup(ENV_APP_DISPLAY_NAME)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),

            history_limit: lookup(ENV_HISTORY_LIMIT)
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|limit| *limit > 0)
                .unwrap_or(defaults.history_limit),

            auto_dismiss_low: lookup(ENV_AUTO_DISMISS_LOW)
                .map(|s| s.to_lowercase() != "false" && s != "0")
                .unwrap_or(defaults.auto_dismiss_low),

            auto_dismiss_delay_ms: lookup(ENV_AUTO_DISMISS_DELAY_MS)
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.auto_dismiss_delay_ms),
        }
    }

    /// Set the display name used for message formatting
    pub fn with_app_display_name(mut self, name: &str) -> Self {
        self.app_display_name = Some(name.to_string());
        self
    }

    /// Set the history bound
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================
