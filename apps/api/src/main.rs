mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod roadmap;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::roadmap::finder::AlternativeFinder;
use crate::roadmap::generator::RoadmapGenerator;
use crate::roadmap::link_validator::{BoundedChecker, HttpLinkChecker, LinkChecker};
use crate::roadmap::reconciler::Reconciler;
use crate::roadmap::store::PgStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Roadmap API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; generation requests will fail until it is configured");
    }

    // Primary and secondary models share one credential
    let primary = LlmClient::new(
        config.gemini_api_key.clone(),
        &config.gemini_api_base,
        &config.roadmap_model,
    );
    let secondary = LlmClient::new(
        config.gemini_api_key.clone(),
        &config.gemini_api_base,
        &config.alternative_model,
    );
    info!(
        "LLM clients initialized (roadmap: {}, alternatives: {})",
        primary.model(),
        secondary.model()
    );

    let checker: Arc<dyn LinkChecker> = Arc::new(BoundedChecker::new(
        Arc::new(HttpLinkChecker::new(config.link_check_timeout_ms)),
        config.link_check_concurrency,
    ));
    let finder = AlternativeFinder::new(Arc::new(secondary), checker.clone());
    let reconciler = Reconciler::new(checker, finder);
    info!(
        "Link checks: timeout {}ms, concurrency {}",
        config.link_check_timeout_ms, config.link_check_concurrency
    );

    let state = AppState {
        profiles: store.clone(),
        roadmaps: store,
        generator: RoadmapGenerator::new(Arc::new(primary), reconciler),
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
