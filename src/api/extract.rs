//! Request metadata extractors.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::request::Parts,
};

use crate::api::middleware::request_id::REQUEST_ID_HEADER;

/// Method, path and request id of the current request.
///
/// Used to fill the success envelope. The request id is present whenever
/// the request went through [`crate::api::middleware::request_id::set_layer`].
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    pub trace_id: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let trace_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Nested routers strip their prefix from `uri`.
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map_or_else(|| parts.uri.path(), |uri| uri.0.path())
            .to_string();

        Ok(Self {
            method: parts.method.to_string(),
            path,
            trace_id,
        })
    }
}
