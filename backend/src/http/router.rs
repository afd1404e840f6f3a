//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::config::ServerSettings;

/// Create the main application router with default server settings.
pub fn create_router(state: AppState) -> Router {
    create_router_with_settings(state, &ServerSettings::default())
}

/// Create the main application router with all routes and middleware.
pub fn create_router_with_settings(state: AppState, settings: &ServerSettings) -> Router {
    let api_v1 = Router::new()
        // Metadata
        .route("/models", get(handlers::list_models))
        .route("/attributes", get(handlers::list_attributes))
        // Upload and scoring
        .route("/predictions", post(handlers::create_predictions))
        // Stored datasets
        .route("/datasets", get(handlers::list_datasets))
        .route(
            "/datasets/{dataset_id}",
            get(handlers::get_dataset).delete(handlers::delete_dataset),
        )
        // Visualization endpoints
        .route("/datasets/{dataset_id}/predictions", get(handlers::get_predictions))
        .route("/datasets/{dataset_id}/aggregate", get(handlers::get_aggregate))
        .route("/datasets/{dataset_id}/scatter", get(handlers::get_scatter))
        // Model evaluation
        .route("/evaluation", get(handlers::get_evaluation));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(settings.body_limit_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&settings.allowed_origins))
        .with_state(state)
}

/// Permissive CORS when no origins are configured, otherwise an allow-list.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpPredictionClient;
    use crate::services::DatasetStore;
    use std::sync::Arc;
    use std::time::Duration;

    fn state() -> AppState {
        let client =
            HttpPredictionClient::new("http://localhost:8000", Duration::from_secs(1)).unwrap();
        AppState::new(Arc::new(client), DatasetStore::new())
    }

    #[test]
    fn test_router_creation() {
        let _router = create_router(state());
    }

    #[test]
    fn test_router_with_origin_list() {
        let settings = ServerSettings {
            allowed_origins: vec!["http://localhost:3000".into(), "bad\norigin".into()],
            ..ServerSettings::default()
        };
        let _router = create_router_with_settings(state(), &settings);
    }
}
