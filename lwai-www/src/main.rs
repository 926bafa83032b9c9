//! lwai-www - landing-page content service
//!
//! Serves `/api/content` for the public site and the section admin API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use lwai_common::config::{load_toml_config, CliOverrides, SiteConfig};
use lwai_common::db::init_database;
use lwai_www::content::seed_placeholders;
use lwai_www::store::SqliteSectionStore;
use lwai_www::{build_router, AppState};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for lwai-www
///
/// The admin password is not a flag; set LWAI_ADMIN_PASSWORD
/// or `admin_password` in the config file.
#[derive(Parser, Debug)]
#[command(name = "lwai-www")]
#[command(about = "Landing-page content service")]
#[command(version)]
struct Args {
    /// Config file (default: ~/.config/lwai/config.toml, then /etc/lwai/config.toml)
    #[arg(short, long, env = "LWAI_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(short, long)]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Storage service base URL used for image URLs
    #[arg(long)]
    storage_url: Option<String>,

    /// Public image bucket
    #[arg(long)]
    storage_bucket: Option<String>,

    /// Bound each section read of the content snapshot (milliseconds)
    #[arg(long)]
    section_read_timeout_ms: Option<u64>,

    /// Insert placeholder content into empty sections at startup
    #[arg(long)]
    seed_placeholders: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lwai_www=info,lwai_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting lwai-www v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let file_config =
        load_toml_config(args.config.as_deref()).context("Failed to load config file")?;
    let config = SiteConfig::resolve(
        CliOverrides {
            database_path: args.database,
            bind_address: args.bind,
            port: args.port,
            storage_url: args.storage_url,
            storage_bucket: args.storage_bucket,
            admin_password: None,
            section_read_timeout_ms: args.section_read_timeout_ms,
        },
        file_config,
    )
    .context("Invalid configuration")?;

    info!("Database path: {}", config.database_path.display());
    info!("Image base: {}", config.storage.public_base);

    let pool = match init_database(&config.database_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };
    let store = Arc::new(SqliteSectionStore::new(pool));

    if args.seed_placeholders {
        let inserted = seed_placeholders(store.as_ref())
            .await
            .context("Failed to seed placeholder content")?;
        info!("Placeholder seeding inserted {} rows", inserted);
    }

    if config.admin_password.is_none() {
        warn!("No admin password configured; admin API is disabled");
    }

    let state = AppState::from_config(store, &config);
    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("lwai-www listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
