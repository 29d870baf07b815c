//! CLI administration tool for snaplink.
//!
//! Inspects and retires short links, shows store statistics and runs
//! database maintenance without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show a link and its visit history
//! cargo run --bin snaplink-admin -- link show Xk3_a9Qz
//!
//! # Soft-delete a link (frees the code for reuse)
//! cargo run --bin snaplink-admin -- link delete Xk3_a9Qz
//!
//! # View statistics
//! cargo run --bin snaplink-admin -- stats
//!
//! # Check database connection / apply migrations
//! cargo run --bin snaplink-admin -- db check
//! cargo run --bin snaplink-admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`

use snaplink::application::services::LinkService;
use snaplink::config::{database_url_from_env, mask_connection_string};
use snaplink::error::AppError;
use snaplink::infrastructure::persistence::{MIGRATOR, PgLinkRepository};
use snaplink::utils::code_generator::validate_short_code;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "snaplink-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or delete short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Show an active link with its visit history
    Show {
        /// 8-character short code
        code: String,
    },

    /// Soft-delete an active link
    Delete {
        /// 8-character short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = database_url_from_env()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repo);

    match action {
        LinkAction::Show { code } => show_link(&service, &code).await,
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await,
    }
}

/// Prints an active link and its most recent visits.
async fn show_link(service: &LinkService<PgLinkRepository>, code: &str) -> Result<()> {
    validate_short_code(code).map_err(|e| anyhow::anyhow!("{}", e))?;

    let link = match service.get_link(code).await {
        Ok(link) => link,
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("No active link with code {code}").yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    println!("{}", "🔗 Short Link".bright_blue().bold());
    println!();
    println!("  Code:     {}", link.short_code.cyan());
    println!("  URL:      {}", link.original_url.bright_white());
    println!("  ID:       {}", link.id.to_string().bright_black());
    println!(
        "  Created:  {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
    );
    println!(
        "  Visits:   {}",
        link.visit_count.to_string().bright_green().bold()
    );

    if !link.visit_timestamps.is_empty() {
        println!();
        println!("{}", "  Recent visits:".bright_white());
        for at in link.visit_timestamps.iter().rev().take(10) {
            println!("    {}", at.format("%Y-%m-%d %H:%M:%S%.3f").to_string().bright_black());
        }
    }
    println!();

    Ok(())
}

/// Soft-deletes a link after confirmation.
async fn delete_link(
    service: &LinkService<PgLinkRepository>,
    code: &str,
    skip_confirm: bool,
) -> Result<()> {
    validate_short_code(code).map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "🗑  Delete Short Link".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete link {code}? Its code becomes reusable"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match service.delete_link(code).await {
        Ok(()) => println!("{}", "✅ Link deleted".green().bold()),
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("No active link with code {code}").yellow())
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to delete link: {}", e)),
    }
    println!();

    Ok(())
}

/// Displays link and visit totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let active: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE deleted_at IS NULL")
        .fetch_one(pool)
        .await?;

    let deleted: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE deleted_at IS NOT NULL")
            .fetch_one(pool)
            .await?;

    let visits: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(visit_count), 0)::BIGINT FROM links")
        .fetch_one(pool)
        .await?;

    println!(
        "  Active links:  {}",
        active.to_string().bright_green().bold()
    );
    println!(
        "  Deleted links: {}",
        deleted.to_string().bright_black()
    );
    println!(
        "  Visits:        {}",
        visits.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            MIGRATOR
                .run(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
