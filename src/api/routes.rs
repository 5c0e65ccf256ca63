//! API Routes
//!
//! Configures the Axum router with all cache endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    calls_handler, get_handler, health_handler, replay_handler, store_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /store` - Store a tagged value under a generated key
/// - `GET /get/:key` - Retrieve a value, optionally decoded
/// - `GET /calls/:name` - Call counter of an instrumented operation
/// - `GET /replay/:name` - Recorded history of an instrumented operation
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/store", put(store_handler))
        .route("/get/:key", get(get_handler))
        .route("/calls/:name", get(calls_handler))
        .route("/replay/:name", get(replay_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
