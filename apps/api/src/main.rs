mod analysis;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;
mod strategy;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, SessionBackend};
use crate::llm_client::{ClaudeGenerator, DisabledGenerator, NarrativeGenerator};
use crate::routes::build_router;
use crate::session::memory::InMemorySessionStore;
use crate::session::redis::RedisSessionStore;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coursecraft API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the session store (in-memory by default, Redis via env)
    let store: Arc<dyn SessionStore> = match &config.session_backend {
        SessionBackend::Memory => {
            info!("Session store: in-memory");
            Arc::new(InMemorySessionStore::new())
        }
        SessionBackend::Redis { url } => {
            let client = redis::Client::open(url.as_str())?;
            info!("Session store: redis");
            Arc::new(RedisSessionStore::new(client))
        }
    };

    // Initialize the narrative generator; without an API key every strategy
    // request takes the local synthesis path
    let generator: Arc<dyn NarrativeGenerator> = match &config.anthropic_api_key {
        Some(key) => Arc::new(ClaudeGenerator::new(key.clone())),
        None => {
            info!("ANTHROPIC_API_KEY not set; narrative generation disabled");
            Arc::new(DisabledGenerator)
        }
    };
    info!(
        "Narrative generator backend: {} (model: {})",
        generator.backend(),
        llm_client::MODEL
    );

    // Build app state
    let state = AppState {
        store,
        generator,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
