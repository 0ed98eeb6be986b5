//! Configuration module

use std::env;

use threat_core::MonitorConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Register the optional DeveloperOptionsEnabled handler
    pub register_developer_options: bool,

    /// Version reported for the HTTP delivery agent
    pub agent_version: String,

    /// Threat monitor settings (THREAT_* variables)
    pub monitor: MonitorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            environment: "development".to_string(),
            register_developer_options: false,
            agent_version: env!("CARGO_PKG_VERSION").to_string(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            environment: env::var("ENVIRONMENT")
                .unwrap_or(defaults.environment),

            register_developer_options: env::var("THREAT_REGISTER_DEVELOPER_OPTIONS")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.register_developer_options),

            agent_version: env::var("AGENT_VERSION")
                .unwrap_or(defaults.agent_version),

            monitor: MonitorConfig::from_env(),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
