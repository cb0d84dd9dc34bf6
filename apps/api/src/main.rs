mod config;
mod dashboard;
mod errors;
mod llm_client;
mod models;
mod resume;
mod routes;
mod state;
mod suggestions;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dashboard::github::GitHubClient;
use crate::dashboard::leetcode::LeetCodeClient;
use crate::llm_client::LlmClient;
use crate::resume::session::AnalysisStore;
use crate::routes::build_router;
use crate::state::AppState;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting devboard API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone(), config.gemini_api_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize dashboard data sources
    let github = GitHubClient::new(config.github_api_url.clone(), config.github_token.clone())?;
    let leetcode = LeetCodeClient::new(config.leetcode_api_url.clone())?;
    info!(
        "Data sources: github={} (token: {}), leetcode={}",
        config.github_api_url,
        config.github_token.is_some(),
        config.leetcode_api_url
    );

    // Analysis sessions, with a periodic sweep for ones nobody comes back to
    let analyses = AnalysisStore::new(chrono::Duration::seconds(i64::from(config.session_ttl_secs)));
    let sweeper = analyses.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            tick.tick().await;
            sweeper.evict_expired(chrono::Utc::now()).await;
        }
    });
    info!("Analysis sessions expire after {}s", config.session_ttl_secs);

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        analyses,
        github,
        leetcode,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the dashboard host once it has a fixed domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
