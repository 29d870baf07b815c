//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkTarget, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Store for short links.
///
/// Implementations own every concurrency guarantee of the link model:
/// uniqueness of active short codes is a storage constraint, and visits are
/// recorded with a single atomic update.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new active link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateCode`] if an active link already holds
    /// `new_link.short_code`. Soft-deleted links never conflict.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds the active link holding `short_code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if an active link holds the code
    /// - `Ok(None)` if none does (never created, or soft-deleted)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError>;

    /// Atomically appends `visited_at`, increments the visit counter and
    /// updates `updated_at` on the active link holding `short_code`.
    ///
    /// Concurrent calls for the same code are all recorded.
    ///
    /// # Returns
    ///
    /// The link after the update, or `Ok(None)` if no active link holds the code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_visit(
        &self,
        short_code: &str,
        visited_at: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError>;

    /// Finds the id and URL of the active link holding `short_code`.
    ///
    /// Same lookup as [`LinkRepository::find_active_by_code`] without loading
    /// the visit history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_redirect_target(
        &self,
        short_code: &str,
    ) -> Result<Option<LinkTarget>, AppError>;

    /// Records a visit like [`LinkRepository::record_visit`], but only if the
    /// active link holding `short_code` is still the one with id `link_id`.
    ///
    /// A code soft-deleted and reused between lookup and tracking therefore
    /// never has the visit counted on the newer link.
    ///
    /// # Returns
    ///
    /// The visit count after the update, or `Ok(None)` if the link is no
    /// longer active under that code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn track_visit(
        &self,
        short_code: &str,
        link_id: Uuid,
        visited_at: DateTime<Utc>,
    ) -> Result<Option<i64>, AppError>;

    /// Soft-deletes the active link holding `short_code`.
    ///
    /// Returns `Ok(true)` if a link was deleted, `Ok(false)` if no active link
    /// holds the code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn soft_delete(&self, short_code: &str) -> Result<bool, AppError>;

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
