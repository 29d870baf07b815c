#![allow(dead_code)]

use snaplink::infrastructure::persistence::PgLinkRepository;
use snaplink::state::AppState;
use sqlx::PgPool;
use std::io;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const BASE_URL: &str = "http://localhost:3000";

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO links (short_code, original_url) VALUES ($1, $2) RETURNING id")
        .bind(code)
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_deleted_link(pool: &PgPool, code: &str, url: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO links (short_code, original_url, deleted_at) VALUES ($1, $2, NOW()) RETURNING id",
    )
    .bind(code)
    .bind(url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn visit_count(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT visit_count FROM links WHERE short_code = $1 AND deleted_at IS NULL")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let link_repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    AppState::new(link_repo, BASE_URL)
}

/// In-memory sink for log output of a thread-local subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Captures every event emitted on the current thread until the guard drops.
///
/// Only reliable on a current-thread runtime (the `#[tokio::test]` default).
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}
