mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod render;
mod review;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{JsonModel, LlmClient};
use crate::render::{TypstRenderer, TEMPLATE_FILE};
use crate::routes::build_router;
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

    info!("Starting Resume Reviewer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.google_api_key.clone(),
        config.llm_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?
    .with_base_url(config.llm_base_url.clone());
    info!("LLM client initialized (model: {})", llm.model_name());

    // Initialize renderer; a missing template is reported per request, not fatal here
    let template_path = config.template_dir.join(TEMPLATE_FILE);
    if !template_path.exists() {
        warn!(
            "Resume template {} not found; /api/v1/render will fail until it exists",
            template_path.display()
        );
    }
    let renderer = TypstRenderer::new(
        config.template_dir.clone(),
        config.typst_bin.clone(),
        Duration::from_secs(config.render_timeout_secs),
    );

    let state = AppState {
        model: Arc::new(llm),
        renderer: Arc::new(renderer),
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
