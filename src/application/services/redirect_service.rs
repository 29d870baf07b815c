//! Short code resolution with visit tracking.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Resolves short codes to their redirect targets and records each visit.
///
/// # Tracking Policy
///
/// Tracking is best-effort: once the link has been found the redirect target
/// is returned even if recording the visit fails. Such failures are logged
/// and never surfaced to the caller.
pub struct RedirectService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> RedirectService<L> {
    /// Creates a new redirect service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Returns the original URL for `short_code` and records a visit.
    ///
    /// The visit is only counted on the link that was looked up; if the code
    /// was deleted and reused in between, the redirect still goes to the
    /// looked-up URL and the newer link is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active link holds the code.
    /// Returns [`AppError::Internal`] if the lookup itself fails.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        let target = self
            .link_repository
            .find_redirect_target(short_code)
            .await?
            .ok_or_else(|| {
                debug!(short_code, "Short code not found");
                AppError::not_found(
                    "Short link not found",
                    json!({ "short_code": short_code }),
                )
            })?;

        match self
            .link_repository
            .track_visit(short_code, target.id, Utc::now())
            .await
        {
            Ok(Some(visit_count)) => {
                debug!(short_code, visit_count, "Visit recorded");
            }
            Ok(None) => {
                warn!(
                    short_code,
                    link_id = %target.id,
                    "Link was deleted or replaced before the visit could be recorded"
                );
            }
            Err(e) => {
                warn!(short_code, error = %e, "Failed to record visit");
            }
        }

        Ok(target.original_url)
    }
}
