//! Milepost API Service
//!
//! Thin HTTP layer in front of a hosted key-value store plus the
//! language-model proxy:
//! - /api/tracker: whole-document tracker state, GET/POST
//! - /api/summary: milestone reflection generation
//!
//! The client stays usable without this service; everything here is
//! best-effort sync on top of its local cache.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use tracing::info;

mod config;
mod handlers;
mod kv;

use config::Config;
use kv::{KvStore, MemoryKv, RestKv};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub kv: Arc<dyn KvStore>,
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/tracker",
            get(handlers::tracker::get_tracker).post(handlers::tracker::post_tracker),
        )
        .route("/api/summary", post(handlers::summary::post_summary))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "milepost_server=info".into()),
        )
        .init();

    let config = Config::parse();

    let kv: Arc<dyn KvStore> = match (&config.kv_url, &config.kv_token) {
        (Some(url), Some(token)) => {
            info!(url = %url, "using REST key-value store");
            Arc::new(RestKv::new(url.clone(), token.clone())?)
        }
        _ => {
            info!("no key-value store configured, falling back to in-memory storage");
            Arc::new(MemoryKv::default())
        }
    };

    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.upstream_timeout_secs))
        .build()?;

    let bind = config.bind;
    let state = AppState {
        kv,
        http,
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %bind, "milepost server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
