//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A short code mapped to its original URL, together with visit statistics.
///
/// `visit_count` always equals `visit_timestamps.len()`; both only grow, and
/// only through [`Link::record_visit`] (or the store's atomic equivalent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub visit_count: i64,
    pub visit_timestamps: Vec<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a freshly inserted, active link with no visits.
    pub fn new(id: Uuid, original_url: String, short_code: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            original_url,
            short_code,
            visit_count: 0,
            visit_timestamps: Vec::new(),
            created_at,
            updated_at: created_at,
            deleted_at: None,
        }
    }

    /// Returns true if the link has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Appends a visit and bumps the counter.
    pub fn record_visit(&mut self, visited_at: DateTime<Utc>) {
        self.visit_timestamps.push(visited_at);
        self.visit_count += 1;
        self.updated_at = visited_at;
    }

    /// Marks the link as soft-deleted. Deletion is terminal.
    pub fn soft_delete(&mut self, deleted_at: DateTime<Utc>) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(deleted_at);
            self.updated_at = deleted_at;
        }
    }
}

/// The part of a link needed to serve a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub id: Uuid,
    pub original_url: String,
}

impl From<&Link> for LinkTarget {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url.clone(),
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub original_url: String,
    pub short_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_link() -> Link {
        Link::new(
            Uuid::now_v7(),
            "https://example.com".to_string(),
            "abcD1234".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            Uuid::nil(),
            "https://example.com".to_string(),
            "abcD1234".to_string(),
            now,
        );

        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.short_code, "abcD1234");
        assert_eq!(link.visit_count, 0);
        assert!(link.visit_timestamps.is_empty());
        assert_eq!(link.created_at, now);
        assert_eq!(link.updated_at, now);
        assert!(!link.is_deleted());
    }

    #[test]
    fn test_record_visit_keeps_count_in_sync() {
        let mut link = sample_link();
        let first = Utc::now();
        let second = first + Duration::seconds(1);

        link.record_visit(first);
        link.record_visit(second);

        assert_eq!(link.visit_count, 2);
        assert_eq!(link.visit_timestamps, vec![first, second]);
        assert_eq!(link.updated_at, second);
    }

    #[test]
    fn test_soft_delete_is_terminal() {
        let mut link = sample_link();
        let deleted_at = Utc::now();

        link.soft_delete(deleted_at);
        link.soft_delete(deleted_at + Duration::minutes(5));

        assert!(link.is_deleted());
        assert_eq!(link.deleted_at, Some(deleted_at));
    }
}
