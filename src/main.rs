mod client;
mod config;
mod error;
mod handlers;
mod logger;
mod metrics;
mod models;

#[cfg(test)]
mod test_support;

use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get, Router};
use config::Config;
use metrics::Metrics;
use reqwest::Client;
use std::sync::Arc;
use tokio::net::TcpListener;

// shared by every handler; the http client is reused so
// connections to the upstream are pooled across requests
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: Client,
    pub metrics: Arc<Metrics>
}

pub fn router(state: AppState) -> Router {

    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_snapshot))
        .route("/api/generate", any(handlers::generate_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)

}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {

    dotenvy::dotenv().ok();
    logger::init();

    let config = Config::from_env()?;

    if config.api_key.is_none() {
        tracing::warn!(
            credential = %config.credential_name,
            "upstream key is not set; /api/generate will answer 500"
        );
    }

    tracing::info!(
        bind_addr = %config.bind_addr,
        upstream_url = %config.upstream_url,
        max_body_bytes = config.max_body_bytes,
        "configuration loaded"
    );

    let listener = TcpListener::bind(config.bind_addr).await?;

    let state = AppState {
        config: Arc::new(config),
        http_client: Client::new(),
        metrics: Arc::new(Metrics::new())
    };

    tracing::info!(address = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state)).await?;

    Ok(())

}
