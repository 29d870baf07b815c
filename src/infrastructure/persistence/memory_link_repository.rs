//! In-process implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::{Link, LinkTarget, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Link store keeping active links in a [`DashMap`] keyed by short code.
///
/// A code maps to at most one active link, so the map itself enforces code
/// uniqueness. Soft-deleted links move to a separate archive and never take
/// part in lookups. Shard guards are released before every method returns,
/// so nothing is held across an `.await`.
///
/// # Use Cases
///
/// - Local development without PostgreSQL (`STORAGE_BACKEND=memory`)
/// - Concurrency tests of the services
#[derive(Default)]
pub struct MemoryLinkRepository {
    active: DashMap<String, Link>,
    deleted: Mutex<Vec<Link>>,
}

impl MemoryLinkRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using in-memory link store");
        Self::default()
    }

    /// Returns every stored link, including soft-deleted ones.
    pub fn snapshot(&self) -> Vec<Link> {
        let mut links: Vec<Link> = self.active.iter().map(|l| l.value().clone()).collect();
        links.extend(self.archive().iter().cloned());
        links
    }

    fn archive(&self) -> MutexGuard<'_, Vec<Link>> {
        self.deleted.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.active.entry(new_link.short_code) {
            Entry::Occupied(entry) => Err(AppError::DuplicateCode {
                code: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let link = Link::new(
                    Uuid::now_v7(),
                    new_link.original_url,
                    entry.key().clone(),
                    Utc::now(),
                );
                entry.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_active_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.active.get(short_code).map(|l| l.value().clone()))
    }

    async fn record_visit(
        &self,
        short_code: &str,
        visited_at: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError> {
        Ok(self.active.get_mut(short_code).map(|mut link| {
            link.record_visit(visited_at);
            link.clone()
        }))
    }

    async fn find_redirect_target(
        &self,
        short_code: &str,
    ) -> Result<Option<LinkTarget>, AppError> {
        Ok(self
            .active
            .get(short_code)
            .map(|l| LinkTarget::from(l.value())))
    }

    async fn track_visit(
        &self,
        short_code: &str,
        link_id: Uuid,
        visited_at: DateTime<Utc>,
    ) -> Result<Option<i64>, AppError> {
        match self.active.get_mut(short_code) {
            Some(mut link) if link.id == link_id => {
                link.record_visit(visited_at);
                Ok(Some(link.visit_count))
            }
            _ => Ok(None),
        }
    }

    async fn soft_delete(&self, short_code: &str) -> Result<bool, AppError> {
        match self.active.remove(short_code) {
            Some((_, mut link)) => {
                link.soft_delete(Utc::now());
                self.archive().push(link);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_link(code: &str, url: &str) -> NewLink {
        NewLink {
            original_url: url.to_string(),
            short_code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MemoryLinkRepository::new();

        let created = repo
            .insert(new_link("abcdEFGH", "https://example.com"))
            .await
            .unwrap();
        let found = repo.find_active_by_code("abcdEFGH").await.unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_insert_duplicate_active_code() {
        let repo = MemoryLinkRepository::new();
        repo.insert(new_link("abcdEFGH", "https://a.example"))
            .await
            .unwrap();

        let result = repo.insert(new_link("abcdEFGH", "https://b.example")).await;

        assert!(matches!(result, Err(AppError::DuplicateCode { code }) if code == "abcdEFGH"));
    }

    #[tokio::test]
    async fn test_deleted_code_can_be_reused() {
        let repo = MemoryLinkRepository::new();
        repo.insert(new_link("abcdEFGH", "https://old.example"))
            .await
            .unwrap();

        assert!(repo.soft_delete("abcdEFGH").await.unwrap());
        assert!(repo.find_active_by_code("abcdEFGH").await.unwrap().is_none());

        let recycled = repo
            .insert(new_link("abcdEFGH", "https://new.example"))
            .await
            .unwrap();
        let found = repo.find_active_by_code("abcdEFGH").await.unwrap().unwrap();

        assert_eq!(found.id, recycled.id);
        assert_eq!(found.original_url, "https://new.example");
        assert_eq!(repo.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_soft_delete_missing_code() {
        let repo = MemoryLinkRepository::new();
        assert!(!repo.soft_delete("zzzzzzzz").await.unwrap());
    }

    #[tokio::test]
    async fn test_record_visit_on_missing_code() {
        let repo = MemoryLinkRepository::new();
        let result = repo.record_visit("zzzzzzzz", Utc::now()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_record_visit_skips_deleted_link() {
        let repo = MemoryLinkRepository::new();
        repo.insert(new_link("abcdEFGH", "https://example.com"))
            .await
            .unwrap();
        repo.soft_delete("abcdEFGH").await.unwrap();

        let result = repo.record_visit("abcdEFGH", Utc::now()).await.unwrap();

        assert!(result.is_none());

        let archived = repo.snapshot();
        assert_eq!(archived.len(), 1);
        assert!(archived[0].is_deleted());
        assert_eq!(archived[0].visit_count, 0);
    }

    #[tokio::test]
    async fn test_deleted_links_leave_the_active_index() {
        let repo = MemoryLinkRepository::new();

        for i in 0..20 {
            repo.insert(new_link("cycle123", &format!("https://{i}.example")))
                .await
                .unwrap();
            assert!(repo.soft_delete("cycle123").await.unwrap());
        }

        assert!(repo.active.is_empty());
        assert_eq!(repo.archive().len(), 20);
        assert!(repo.archive().iter().all(Link::is_deleted));
        assert!(repo.find_active_by_code("cycle123").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_of_same_code() {
        let repo = Arc::new(MemoryLinkRepository::new());

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..20 {
            let repo = repo.clone();
            tasks.spawn(async move {
                repo.insert(new_link("contend1", &format!("https://{i}.example")))
                    .await
            });
        }

        let mut created = 0;
        let mut duplicates = 0;
        while let Some(res) = tasks.join_next().await {
            match res.unwrap() {
                Ok(_) => created += 1,
                Err(AppError::DuplicateCode { .. }) => duplicates += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(duplicates, 19);
        assert_eq!(repo.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_track_visit_requires_matching_id() {
        let repo = MemoryLinkRepository::new();
        let old = repo
            .insert(new_link("abcdEFGH", "https://old.example"))
            .await
            .unwrap();
        repo.soft_delete("abcdEFGH").await.unwrap();
        let new = repo
            .insert(new_link("abcdEFGH", "https://new.example"))
            .await
            .unwrap();

        let stale = repo
            .track_visit("abcdEFGH", old.id, Utc::now())
            .await
            .unwrap();
        assert!(stale.is_none());

        let current = repo
            .track_visit("abcdEFGH", new.id, Utc::now())
            .await
            .unwrap();
        assert_eq!(current, Some(1));

        let target = repo.find_redirect_target("abcdEFGH").await.unwrap().unwrap();
        assert_eq!(target.id, new.id);
        assert_eq!(target.original_url, "https://new.example");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_visits_are_all_recorded() {
        let repo = Arc::new(MemoryLinkRepository::new());
        repo.insert(new_link("abcdEFGH", "https://example.com"))
            .await
            .unwrap();

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..50 {
            let repo = repo.clone();
            tasks.spawn(async move { repo.record_visit("abcdEFGH", Utc::now()).await });
        }
        while let Some(res) = tasks.join_next().await {
            assert!(res.unwrap().unwrap().is_some());
        }

        let link = repo.find_active_by_code("abcdEFGH").await.unwrap().unwrap();
        assert_eq!(link.visit_count, 50);
        assert_eq!(link.visit_timestamps.len(), 50);
    }
}
