//! HTTP transport for the gallery: JSON API, embedded UI and the images themselves.

pub mod error;
pub mod filtering;
pub mod handlers;
pub mod state;

use crate::config::AppConfig;
use crate::core::Indexer;
use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

pub use state::AppState;

/// Builds the application router.
///
/// Anything that is not an API or UI route is served from the base
/// directory, so the relative paths in `images` are directly fetchable. The
/// UI lives under the `assets` folder name, which scans never return.
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(state.base_dir());

    Router::new()
        .route("/", get(handlers::index))
        .route("/assets/*path", get(handlers::ui_asset))
        .route("/api/models", get(handlers::list_models))
        .route("/api/categories", get(handlers::list_categories))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(static_files)
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C.
pub async fn serve(config: AppConfig) -> Result<()> {
    let base_dir = config.resolved_base_directory()?;
    if !base_dir.is_dir() {
        tracing::warn!(
            "Base directory {} is not a readable directory; scans will fail",
            base_dir.display()
        );
    }

    let state = AppState::new(base_dir.clone(), Indexer::new(config.indexer_options()));
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(
        "✅ The server is running: http://{} (serving {})",
        listener.local_addr()?,
        base_dir.display()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested.");
}
