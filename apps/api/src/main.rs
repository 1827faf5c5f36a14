mod analysis;
mod config;
mod documents;
mod errors;
mod letter;
mod llm_client;
mod routes;
mod state;
mod validation;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::taxonomy::SkillTaxonomy;
use crate::config::Config;
use crate::letter::writer::LlmLetterWriter;
use crate::llm_client::LlmClient;
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

    info!("Starting Coverly API v{}", env!("CARGO_PKG_VERSION"));

    // Load the skill taxonomy (custom file or the embedded default)
    let taxonomy = match &config.skill_taxonomy_path {
        Some(path) => SkillTaxonomy::from_path(path)
            .with_context(|| format!("Failed to load skill taxonomy from {}", path.display()))?,
        None => SkillTaxonomy::builtin().context("Embedded skill taxonomy is invalid")?,
    };
    info!("Skill taxonomy loaded ({} skills)", taxonomy.len());

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())
        .context("Failed to build LLM client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let cors = build_cors(&config)?;

    // Build app state
    let state = AppState {
        config: config.clone(),
        taxonomy: Arc::new(taxonomy),
        letter_writer: Arc::new(LlmLetterWriter(llm)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `*` in ALLOWED_ORIGINS opens CORS to every origin; otherwise only the listed ones.
fn build_cors(config: &Config) -> Result<CorsLayer> {
    if config.allows_any_origin() {
        return Ok(CorsLayer::permissive());
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    info!("CORS restricted to {} origin(s)", origins.len());

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}
