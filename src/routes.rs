//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`       - Short link redirect
//! - `GET  /health`       - Health check
//! - `/{prefix}/*`        - REST API (prefix from `GLOBAL_PREFIX`)
//!
//! # Middleware
//!
//! - **Request id** - Assigns/propagates `x-request-id`
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive, credentials allowed
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{request_id, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `global_prefix` - path segment the API routes are nested under (e.g. `api`)
pub fn app_router(state: AppState, global_prefix: &str) -> NormalizePath<Router> {
    let api_path = format!("/{}", global_prefix.trim_matches('/'));

    let router = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest(&api_path, api::routes::api_routes())
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(request_id::propagate_layer())
        .layer(tracing::layer())
        .layer(request_id::set_layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
