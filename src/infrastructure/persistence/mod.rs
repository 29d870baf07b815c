//! Link store implementations.
//!
//! - [`PgLinkRepository`] - PostgreSQL storage, the production backend
//! - [`MemoryLinkRepository`] - In-process storage for local runs and tests
//!
//! The schema lives in `migrations/` and is embedded into the binary through
//! [`MIGRATOR`].

use sqlx::migrate::Migrator;

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
