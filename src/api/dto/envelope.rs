//! Success envelope wrapping every JSON API response.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::extract::RequestContext;

/// Standard success body: `{"success": true, "data": ..., ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub path: String,
    pub method: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps `data` with metadata from the current request.
    pub fn new(data: T, ctx: RequestContext) -> Self {
        Self {
            success: true,
            data,
            path: ctx.path,
            method: ctx.method,
            timestamp: Utc::now(),
            trace_id: ctx.trace_id,
        }
    }
}
