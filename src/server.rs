//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, database connections, migrations and the Axum
//! server lifecycle.

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{MIGRATOR, MemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens a PostgreSQL pool using the configured pool settings.
///
/// # Errors
///
/// Returns an error if `database_url` is missing or the connection fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres storage backend")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Builds the link store selected by `STORAGE_BACKEND`.
///
/// For PostgreSQL this connects and applies pending migrations.
async fn build_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_pool(config).await?;
            tracing::info!("Connected to database");

            MIGRATOR
                .run(&pool)
                .await
                .context("Failed to apply migrations")?;
            tracing::info!("Migrations applied");

            Ok(Arc::new(PgLinkRepository::new(Arc::new(pool))))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory link store; links are lost on restart");
            Ok(Arc::new(MemoryLinkRepository::new()))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (PostgreSQL pool + migrations, or in-memory)
/// - Application services
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;

    let state = AppState::new(repository, config.base_url.clone());

    let app = app_router(state, &config.global_prefix);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
