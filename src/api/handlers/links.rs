//! Handlers for link management endpoints (create, inspect, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::link::{CreateLinkRequest, LinkResponse};
use crate::api::extract::RequestContext;
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::validate_short_code;

fn to_response(state: &AppState, link: Link) -> LinkResponse {
    let short_url = state
        .link_service
        .get_short_url(&state.base_url, &link.short_code);
    LinkResponse::from_link(link, short_url)
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": "0192f0c4-...",
///     "original_url": "https://example.com",
///     "short_code": "Xk3_a9Qz",
///     "short_url": "http://localhost:3000/Xk3_a9Qz",
///     "visit_count": 0,
///     "visit_timestamps": [],
///     "created_at": "...",
///     "updated_at": "..."
///   },
///   "path": "/api/links",
///   "method": "POST",
///   "timestamp": "...",
///   "trace_id": "0192f0c4-..."
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is empty or not an absolute http(s) URL.
/// Returns 500 if no unique code could be allocated or the store fails.
pub async fn create_link_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LinkResponse>>), AppError> {
    payload.validate()?;

    let link = state.link_service.create_link(payload.original_url).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(to_response(&state, link), ctx)),
    ))
}

/// Returns an active link with its visit statistics, without counting a visit.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 400 Bad Request if the code is malformed.
/// Returns 404 Not Found if no active link holds the code.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<ApiResponse<LinkResponse>>, AppError> {
    validate_short_code(&code)?;

    let link = state.link_service.get_link(&code).await?;

    Ok(Json(ApiResponse::new(to_response(&state, link), ctx)))
}

/// Soft-deletes a link, freeing its code for reuse.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Errors
///
/// Returns 400 Bad Request if the code is malformed.
/// Returns 404 Not Found if no active link holds the code.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    validate_short_code(&code)?;

    state.link_service.delete_link(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
