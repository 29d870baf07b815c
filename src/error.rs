//! Application error type and its HTTP representation.
//!
//! Every layer returns [`AppError`]. Handlers let axum turn it into a JSON
//! error envelope through the [`IntoResponse`] impl below.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    status_code: u16,
    error: ErrorInfo,
    timestamp: DateTime<Utc>,
}

/// Machine-readable error payload embedded in error responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// An active link already holds this short code.
    ///
    /// Raised by the store on insert; the creation service retries with a
    /// fresh code, so this only reaches a client if something bypassed it.
    #[error("Short code '{code}' is already in use")]
    DuplicateCode { code: String },

    /// Every generated candidate collided with an active link.
    #[error("Failed to allocate a unique short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::DuplicateCode { .. } => StatusCode::CONFLICT,
            AppError::CodeSpaceExhausted { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short error code used in the response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::DuplicateCode { .. } => "duplicate_code",
            AppError::CodeSpaceExhausted { .. } => "code_space_exhausted",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let details = match self {
            AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Internal { details, .. } => details.clone(),
            AppError::DuplicateCode { code } => json!({ "short_code": code }),
            AppError::CodeSpaceExhausted { attempts } => json!({ "attempts": attempts }),
        };

        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        } else if !matches!(self, AppError::NotFound { .. }) {
            tracing::warn!(code = self.code(), "{}", self);
        }

        let body = ErrorBody {
            success: false,
            status_code: status.as_u16(),
            error: self.to_error_info(),
            timestamp: Utc::now(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        // Callers decide the severity; raw driver errors never reach clients.
        tracing::debug!(error = %e, "Database error");

        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::internal("Database unavailable", json!({}))
            }
            _ => AppError::internal("Database error", json!({})),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        AppError::bad_request("Request validation failed", Value::Object(fields))
    }
}
