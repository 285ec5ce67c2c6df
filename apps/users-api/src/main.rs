//! # Shop Pay Users Server
//!
//! REST server for users and account registration.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Users Server                                     │
//! │                                                                         │
//! │  App ───► HTTP (8000) ───► axum Router ───► shop-db ───► SQLite        │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │                            shop-core (validation, catalog)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use shop_db::{Database, DbConfig};
use shop_users_api::{app, AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Shop Pay users server...");

    let config = ServerConfig::load().context("failed to load configuration")?;
    info!(
        port = config.port,
        database = %config.database_path,
        "Configuration loaded"
    );

    if config.supermarket_public_key.is_empty() {
        warn!("supermarket_public_key is not set; registrations will return an empty key");
    }

    let db = Database::new(DbConfig::new(&config.database_path))
        .await
        .context("failed to open users database")?;
    info!("Connected to users database");

    let state = AppState::new(db.clone(), config.supermarket_public_key.clone());
    let router = app(state, config.request_timeout());

    let addr = config
        .bind_address()
        .context("invalid host/port combination")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "Users server running");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
