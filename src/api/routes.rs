//! API Routes
//!
//! Configures the Axum router with all diagnostics endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_report_handler, clear_cache_handler, cleanup_cache_handler, delete_entry_handler,
    get_entry_handler, health_handler, list_caches_handler, set_entry_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check
/// - `GET /caches` - Stats for every domain cache
/// - `GET|DELETE /caches/:domain` - Stats for, or clear, one cache
/// - `POST /caches/:domain/cleanup` - Sweep expired entries now
/// - `GET|PUT|DELETE /caches/:domain/entries/:key` - Single entry access
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/caches", get(list_caches_handler))
        .route(
            "/caches/:domain",
            get(cache_report_handler).delete(clear_cache_handler),
        )
        .route("/caches/:domain/cleanup", post(cleanup_cache_handler))
        .route(
            "/caches/:domain/entries/:key",
            get(get_entry_handler)
                .put(set_entry_handler)
                .delete(delete_entry_handler),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
