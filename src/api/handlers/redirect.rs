//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::validate_short_code;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Validate the code shape (8 URL-safe characters)
/// 2. Resolve it through [`crate::application::services::RedirectService`],
///    which records the visit
/// 3. Return 301 Moved Permanently with the original URL in `Location`
///
/// # Errors
///
/// Returns 400 Bad Request if the code is malformed.
/// Returns 404 Not Found if no active link holds the code.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    validate_short_code(&code)?;

    let original_url = state.redirect_service.resolve(&code).await?;

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, original_url)],
    ))
}
