mod config;
mod degrade;
mod error;
mod handlers;
mod metrics;
mod models;
mod normalize;
mod orchestrator;
mod state;
mod upstream;

use clap::Parser; // for cli
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{Args, GatewayConfig};
use crate::state::AppState;
use crate::upstream::HfClient;

// the token probe only needs a few tokens back
const PROBE_MAX_NEW_TOKENS: u32 = 5;

// this is main async function with tokio
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // parse cli arguments
    let args = Args::parse();
    let config = GatewayConfig::from_args(&args)?;

    let http = reqwest::Client::builder()
        .user_agent(concat!("hf-gateway/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let client = Arc::new(HfClient::new(http.clone(), &config));
    let probe = Arc::new(HfClient::new(http, &config).with_max_new_tokens(PROBE_MAX_NEW_TOKENS));

    match config.token {
        Some(_) => info!("upstream credential configured"),
        None => warn!("HF_TOKEN not set, generation will answer with mock responses"),
    }
    info!(models = ?config.models, base_url = %config.base_url, "candidate models loaded");
    info!(
        backoff_ms = config.retry_backoff.as_millis() as u64,
        timeout_secs = config.attempt_timeout.as_secs(),
        "retry policy"
    );

    // creating shared state
    let state = Arc::new(AppState::new(config, client, probe));
    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Gateway running on http://localhost:{}", args.port);
    axum::serve(listener, app).await?;
    Ok(())
}
