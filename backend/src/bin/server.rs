//! Flight delay dashboard HTTP server.
//!
//! Loads configuration, connects the model service client, and serves the
//! REST API.
//!
//! # Usage
//!
//! ```bash
//! MODEL_SERVICE_URL=http://localhost:8000 cargo run --bin flight-delay-server
//! ```
//!
//! See [`flight_delay::config`] for every environment variable. `RUST_LOG`
//! sets the log filter (default: info).

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use flight_delay::client::HttpPredictionClient;
use flight_delay::config::AppConfig;
use flight_delay::http::{create_router_with_settings, AppState};
use flight_delay::services::DatasetStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting flight delay dashboard server");

    let config = AppConfig::load()?;

    let client = HttpPredictionClient::from_settings(&config.model_service)?;
    info!(
        "Forwarding predictions to {} (timeout {}s)",
        client.base_url(),
        config.model_service.timeout_secs
    );

    let state = AppState::new(
        Arc::new(client),
        DatasetStore::with_capacity(config.store.max_datasets),
    )
    .with_default_sample_size(config.model_service.default_sample_size);

    let app = create_router_with_settings(state, &config.server);

    let addr: SocketAddr = config.server.bind_address().parse()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
