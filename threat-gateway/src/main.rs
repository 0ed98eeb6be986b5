//! Threat Gateway Server
//!
//! HTTP delivery channel between remote monitoring agents and the threat
//! engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     THREAT GATEWAY                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌────────────────────┐ │
//! │  │  API      │──▶│ Event Bridge │──▶│  Threat Monitor    │ │
//! │  │  (Axum)   │   │ (normalize)  │   │ (current/history)  │ │
//! │  └─────┬─────┘   └──────────────┘   └─────────┬──────────┘ │
//! │        │  strict ingest                        │            │
//! │        └──────────────────────────────────────▶│            │
//! │                                                ▼            │
//! │                                     ┌────────────────────┐ │
//! │                                     │  Handler Registry  │ │
//! │                                     └────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod agent;
mod config;
mod handlers;
mod error;


use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use threat_core::handlers::catalog;
use threat_core::{ThreatAgent, ThreatEventBridge, ThreatHandlerRegistry, ThreatMonitor};

use crate::agent::HttpAgent;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();

    let config = config::Config::from_env();

    // Initialize logging (JSON lines in production)
    let production = config.is_production();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "threat_gateway=debug,threat_core=info,tower_http=debug".into()))
        .with(production.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!production).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Threat Gateway starting ({})...", config.environment);

    // Build application state
    let state = AppState::build(config.clone());
    tracing::info!(
        "Registry ready: {} event types, bridge protected: {}",
        state.registry.len(),
        state.bridge.is_protected()
    );

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ThreatHandlerRegistry>,
    pub monitor: Arc<ThreatMonitor>,
    pub bridge: Arc<ThreatEventBridge>,
    pub agent: Arc<HttpAgent>,
    pub config: config::Config,
}

impl AppState {
    /// Wire registry -> monitor -> bridge. Registration happens here,
    /// before the registry is shared.
    pub fn build(config: config::Config) -> Self {
        let mut registry = ThreatHandlerRegistry::new();
        if config.register_developer_options {
            registry.register_handler(catalog::developer_options_enabled());
            tracing::info!("DeveloperOptionsEnabled handler registered");
        }
        let registry = Arc::new(registry);

        let monitor = Arc::new(ThreatMonitor::new(registry.clone(), config.monitor.clone()));

        let agent = Arc::new(HttpAgent::new(config.agent_version.clone()));
        let agent_handle: Arc<dyn ThreatAgent> = agent.clone();
        let bridge = Arc::new(ThreatEventBridge::new(Some(agent_handle)));
        bridge.initialize();
        monitor.attach(&bridge);

        Self {
            registry,
            monitor,
            bridge,
            agent,
            config,
        }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))

        // Threats (POST = strict agent ingest)
        .route(
            "/api/v1/threats",
            get(handlers::threats::list)
                .post(handlers::threats::ingest)
                .delete(handlers::threats::clear),
        )
        .route(
            "/api/v1/threats/current",
            get(handlers::threats::current).delete(handlers::threats::dismiss),
        )
        .route("/api/v1/threats/stats", get(handlers::threats::stats))
        .route("/api/v1/threats/:uuid", get(handlers::threats::get))
        .route("/api/v1/threats/:uuid/summary", get(handlers::threats::summary))
        .route("/api/v1/threats/:uuid/resolve", put(handlers::threats::resolve))

        // Native bridge
        .route("/api/v1/bridge/events", post(handlers::bridge::native_event))
        .route("/api/v1/bridge/check", post(handlers::bridge::trigger_check))
        .route("/api/v1/bridge/status", get(handlers::bridge::status))

        // Catalog
        .route("/api/v1/handlers", get(handlers::catalog::list))
        .route("/api/v1/handlers/:event_type", get(handlers::catalog::get))
        .route("/api/v1/severities", get(handlers::catalog::severities))

        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
