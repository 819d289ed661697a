mod applications;
mod config;
mod contacts;
mod cv;
mod db;
mod errors;
mod inventory;
mod llm_client;
mod models;
mod plan;
mod progress;
mod radar;
mod routes;
mod snapshot;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::snapshot::insights::{InsightSource, LlmInsightSource};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Snapshot insights: LLM when a key is configured, fallback otherwise
    let insights = build_insight_source(&config)?;

    let state = AppState { db, insights };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_insight_source(config: &Config) -> Result<Option<Arc<dyn InsightSource>>> {
    let Some(key) = config.anthropic_api_key.clone() else {
        warn!("ANTHROPIC_API_KEY not set; assessments will receive fallback snapshots");
        return Ok(None);
    };
    let client = LlmClient::new(key)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    Ok(Some(Arc::new(LlmInsightSource(client))))
}
