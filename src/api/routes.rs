//! API route configuration.

use crate::api::handlers::{create_link_handler, delete_link_handler, get_link_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// API routes, nested under the configured global prefix.
///
/// # Endpoints
///
/// - `POST   /links`          - Create a short link
/// - `GET    /links/{code}`   - Link details and visit statistics
/// - `DELETE /links/{code}`   - Soft-delete a link
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler))
        .route(
            "/links/{code}",
            get(get_link_handler).delete(delete_link_handler),
        )
}
