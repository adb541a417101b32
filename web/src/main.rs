//! tasklist HTTP server.
//!
//! Serves the todo API over a JSON file.
//!
//! # Configuration
//!
//! Environment variables (a `.env` file is honored):
//!
//! - `HOST` / `PORT`: bind address (default `0.0.0.0:3001`)
//! - `TODO_FILE`: store location (default `todos.json`)
//! - `APP_ENV=production`: restrict CORS to `ALLOWED_ORIGINS`
//! - `RUST_LOG`: log filter

use anyhow::Context;
use std::sync::Arc;
use tasklist_core::environment::SystemClock;
use tasklist_core::{FileStorage, TodoEnvironment, TodoService};
use tasklist_web::{AppState, ServerConfig, app};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = ServerConfig::from_env();
    info!(
        todo_file = %config.todo_file.display(),
        environment = ?config.environment,
        "Starting tasklist server"
    );

    let service = TodoService::new(
        Arc::new(FileStorage::new(&config.todo_file)),
        TodoEnvironment::new(Arc::new(SystemClock)),
    );
    let router = app(AppState::new(service), &config);

    let addr = config
        .bind_addr()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Server running at http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shutdown complete");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklist_web=info,tasklist_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
