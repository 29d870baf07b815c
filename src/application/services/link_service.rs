//! Link creation and retrieval service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};
use serde_json::json;
use tracing::{error, info, warn};

/// Maximum number of candidate codes tried before giving up.
pub const MAX_CODE_ATTEMPTS: usize = 5;

/// Service for creating, inspecting and retiring short links.
///
/// Code uniqueness is never checked up front: each candidate is inserted
/// directly and the store's constraint decides. A rejected candidate is
/// replaced by a fresh one, up to [`MAX_CODE_ATTEMPTS`] times.
pub struct LinkService<L: LinkRepository + ?Sized, G: CodeGenerator = RandomCodeGenerator> {
    link_repository: Arc<L>,
    generator: G,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a link service drawing codes from the system CSPRNG.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self::with_generator(link_repository, RandomCodeGenerator)
    }
}

impl<L: LinkRepository + ?Sized, G: CodeGenerator> LinkService<L, G> {
    /// Creates a link service with a custom code source.
    pub fn with_generator(link_repository: Arc<L>, generator: G) -> Self {
        Self {
            link_repository,
            generator,
        }
    }

    /// Creates a short link for an already validated URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeSpaceExhausted`] if every candidate collided
    /// with an active link.
    ///
    /// Returns [`AppError::Internal`] on store errors; those are not retried.
    pub async fn create_link(&self, original_url: String) -> Result<Link, AppError> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let new_link = NewLink {
                original_url: original_url.clone(),
                short_code: self.generator.generate(),
            };

            match self.link_repository.insert(new_link).await {
                Ok(link) => {
                    info!(short_code = %link.short_code, link_id = %link.id, "Short link created");
                    return Ok(link);
                }
                Err(AppError::DuplicateCode { code }) => {
                    warn!(attempt, short_code = %code, "Short code collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        error!(
            attempts = MAX_CODE_ATTEMPTS,
            "Could not allocate a unique short code"
        );

        Err(AppError::CodeSpaceExhausted {
            attempts: MAX_CODE_ATTEMPTS,
        })
    }

    /// Retrieves the active link holding `short_code`, without recording a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active link holds the code.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn get_link(&self, short_code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_active_by_code(short_code)
            .await?
            .ok_or_else(|| not_found(short_code))
    }

    /// Soft-deletes the active link holding `short_code`, freeing the code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active link holds the code.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn delete_link(&self, short_code: &str) -> Result<(), AppError> {
        if self.link_repository.soft_delete(short_code).await? {
            info!(short_code, "Short link deleted");
            Ok(())
        } else {
            Err(not_found(short_code))
        }
    }

    /// Checks that the underlying store is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Constructs the public short URL for a code.
    pub fn get_short_url(&self, base_url: &str, short_code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), short_code)
    }
}

fn not_found(short_code: &str) -> AppError {
    AppError::not_found(
        "Short link not found",
        json!({ "short_code": short_code }),
    )
}
