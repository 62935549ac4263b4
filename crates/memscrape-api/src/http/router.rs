//! Axum router configuration with middleware.
//!
//! Routes mirror the original wire contract: `/scrape` (POST and by-username
//! GET), `/cache/{username}` eviction, `/health`, and a discovery root.
//! Middleware: CORS and request tracing.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health::health_check))
        .route("/scrape", post(handlers::scrape::scrape_profile))
        .route("/scrape/{username}", get(handlers::scrape::scrape_by_username))
        .route("/cache/{username}", delete(handlers::scrape::evict_cached))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - API discovery payload.
async fn root() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "message": "LinkedIn Profile Scraper API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "scrape": "/scrape - POST a profile URL to retrieve its data",
            "scrape_by_username": "/scrape/{username} - GET by bare username",
            "evict": "/cache/{username} - DELETE cached records",
            "health": "/health - Health check",
        },
    }))
}
