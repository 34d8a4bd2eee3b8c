//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Largest accepted request body (delivery batches can be long).
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Flight CRUD
        .route(
            "/flights",
            get(handlers::list_flights).post(handlers::create_flight),
        )
        .route(
            "/flights/{flight_id}",
            get(handlers::get_flight)
                .put(handlers::update_flight)
                .delete(handlers::delete_flight),
        )
        // Delivery
        .route("/delivery", post(handlers::record_delivery))
        .route("/flights/{flight_id}/delivery", get(handlers::get_flight_delivery))
        // Pacing readouts
        .route("/flights/{flight_id}/pacing", get(handlers::get_flight_pacing))
        .route("/pacing", get(handlers::list_pacing))
        .route("/timeline", get(handlers::get_timeline));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
