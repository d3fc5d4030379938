mod config;
mod cv;
mod errors;
mod job;
mod llm_client;
mod models;
mod routes;
mod state;
mod suggestions;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::job::fetcher::DescriptionFetcher;
use crate::llm_client::bedrock::BedrockEndpoint;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Matcher API v{}", env!("CARGO_PKG_VERSION"));

    // Reserved for future use; nothing is persisted yet.
    tokio::fs::create_dir_all(&config.data_dir)
        .await
        .with_context(|| format!("Failed to create data dir {}", config.data_dir.display()))?;

    // Initialize inference client
    let endpoint = BedrockEndpoint::connect(
        &config.aws_region,
        &config.aws_profile,
        config.inference.timeout,
    )
    .await;
    let llm = LlmClient::new(Arc::new(endpoint), config.inference.clone());
    info!(
        "LLM client initialized (model: {}, max attempts: {})",
        llm.model_id(),
        config.inference.max_attempts
    );

    // Initialize job posting fetcher
    let fetcher = DescriptionFetcher::new(config.fetch_timeout)?;
    info!(
        "Job posting fetcher initialized (timeout: {}s)",
        config.fetch_timeout.as_secs()
    );

    let state = AppState {
        llm,
        fetcher,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
