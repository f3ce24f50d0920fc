//! Job Board API Server
//!
//! Fetches one page of the upstream job board per request and returns the
//! extracted job records as JSON.

mod config;
mod jobs;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, http::Method, routing::get};
use common::{Site, USER_AGENT};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::jobs::jobs_handler;

/// Shared application state
pub struct AppState {
    pub client: reqwest::Client,
    pub site: Site,
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    "🌲 Job Board API\n\nEndpoints:\n  GET /api/jobs?pagesize=<int>&max=<int> - Jobs from the first listing page\n\nExample:\n  curl 'http://127.0.0.1:5000/api/jobs?max=5'"
}

/// Builds the router. Everything under /api accepts cross-origin requests.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    let api = Router::new().route("/jobs", get(jobs_handler)).layer(cors);

    Router::new()
        .route("/", get(root_handler))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting Job Board API Server...");

    let config = Config::from_env().context("Failed to load configuration")?;
    let site = Site::from_url(&config.job_board_url)
        .with_context(|| format!("Invalid JOB_BOARD_URL: {}", config.job_board_url))?;

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.upstream_timeout)
        .build()
        .context("Failed to create HTTP client")?;

    info!("Upstream listing: {}", site.listing());

    let state = Arc::new(AppState { client, site });

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("🌐 Server running at http://{}", addr);
    info!("   Try: curl 'http://{}/api/jobs?max=5'", addr);

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}
