//! API Routes
//!
//! Configures the Axum router with all inspection endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clean_handler, clear_handler, delete_handler, delete_pattern_handler, health_handler,
    invalidate_tag_handler, keys_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check endpoint
/// - `GET /stats` - Namespace statistics
/// - `GET /keys` - List keys
/// - `DELETE /keys` - Clear the namespace
/// - `DELETE /keys/:key` - Delete a key
/// - `DELETE /tags/:tag` - Invalidate a tag
/// - `DELETE /patterns/:pattern` - Delete keys containing a substring
/// - `POST /clean` - Sweep expired entries
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/keys", get(keys_handler).delete(clear_handler))
        .route("/keys/:key", delete(delete_handler))
        .route("/tags/:tag", delete(invalidate_tag_handler))
        .route("/patterns/:pattern", delete(delete_pattern_handler))
        .route("/clean", post(clean_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
