mod advisor;
mod config;
mod errors;
mod grounding;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::advisor::orchestrator::RequestOrchestrator;
use crate::config::Config;
use crate::grounding::GroundingCorpus;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting advisor API v{}", env!("CARGO_PKG_VERSION"));

    // Load the reference document once; a missing document is not fatal
    let corpus = Arc::new(GroundingCorpus::load(&config.corpus_path));
    info!("Grounding corpus source: {:?}", corpus.source());

    // Fails fast with MissingCredential before any upstream call
    let orchestrator = RequestOrchestrator::from_config(&config, corpus)?;
    info!(
        "Advisor ready: institution={}, market_year={}, upstream_timeout={}s",
        config.institution, config.market_year, config.upstream_timeout_secs
    );

    let state = AppState {
        orchestrator: Arc::new(orchestrator),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the frontend origin once it is configurable

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
