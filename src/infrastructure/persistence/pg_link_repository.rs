//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, LinkTarget, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: Uuid,
    original_url: String,
    short_code: String,
    visit_count: i64,
    visit_timestamps: Vec<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            original_url: row.original_url,
            short_code: row.short_code,
            visit_count: row.visit_count,
            visit_timestamps: row.visit_timestamps,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Active-code uniqueness is enforced by the partial unique index
/// `links_short_code_active_key`; visit recording is a single `UPDATE`
/// that increments and appends in place.
///
/// The redirect path uses [`LinkRepository::find_redirect_target`] and
/// [`LinkRepository::track_visit`], which never read `visit_timestamps`
/// back, so a popular link's history is not shipped on every redirect.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let result = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (original_url, short_code)
            VALUES ($1, $2)
            RETURNING id, original_url, short_code, visit_count, visit_timestamps,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.short_code)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation_on_code(&e) => Err(AppError::DuplicateCode {
                code: new_link.short_code,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_active_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_url, short_code, visit_count, visit_timestamps,
                   created_at, updated_at, deleted_at
            FROM links
            WHERE short_code = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn record_visit(
        &self,
        short_code: &str,
        visited_at: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET visit_count = visit_count + 1,
                visit_timestamps = array_append(visit_timestamps, $2),
                updated_at = $2
            WHERE short_code = $1 AND deleted_at IS NULL
            RETURNING id, original_url, short_code, visit_count, visit_timestamps,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(short_code)
        .bind(visited_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_redirect_target(
        &self,
        short_code: &str,
    ) -> Result<Option<LinkTarget>, AppError> {
        let row = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT id, original_url
            FROM links
            WHERE short_code = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|(id, original_url)| LinkTarget { id, original_url }))
    }

    async fn track_visit(
        &self,
        short_code: &str,
        link_id: Uuid,
        visited_at: DateTime<Utc>,
    ) -> Result<Option<i64>, AppError> {
        let visit_count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE links
            SET visit_count = visit_count + 1,
                visit_timestamps = array_append(visit_timestamps, $3),
                updated_at = $3
            WHERE short_code = $1 AND id = $2 AND deleted_at IS NULL
            RETURNING visit_count
            "#,
        )
        .bind(short_code)
        .bind(link_id)
        .bind(visited_at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(visit_count)
    }

    async fn soft_delete(&self, short_code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE short_code = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(short_code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
