//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::Link;
use crate::utils::url_validation::validate_redirect_target;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The redirect target (must be an absolute HTTP/HTTPS URL).
    #[validate(
        length(min = 1, message = "original_url must not be empty"),
        custom(function = validate_redirect_target)
    )]
    pub original_url: String,
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub visit_count: i64,
    pub visit_timestamps: Vec<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Builds the response around an already computed `short_url`.
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
            short_url,
            visit_count: link.visit_count,
            visit_timestamps: link.visit_timestamps,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}
