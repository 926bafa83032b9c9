//! Database initialization
//!
//! Creates the database file on first run and every section table
//! idempotently, so a fresh install starts with an empty but valid store.

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

use crate::{Result, Section};

/// Open (creating if needed) the database and ensure all section tables exist
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(16)
        .min_connections(1)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets the aggregator's concurrent readers proceed during admin writes
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_section_tables(&pool).await?;

    Ok(pool)
}

/// Single-connection in-memory database with all section tables
///
/// Every connection to `sqlite::memory:` is a separate database, so the pool
/// is capped at one connection.
pub async fn open_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    create_section_tables(&pool).await?;
    Ok(pool)
}

/// Create one table per section (idempotent)
pub async fn create_section_tables(pool: &SqlitePool) -> Result<()> {
    for section in Section::ALL {
        create_section_table(pool, section).await?;
    }
    Ok(())
}

async fn create_section_table(pool: &SqlitePool, section: Section) -> Result<()> {
    let table = section.table_name();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id TEXT PRIMARY KEY,
            data TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{table}_active_order ON {table} (is_active, sort_order)"
    ))
    .execute(pool)
    .await?;

    Ok(())
}
