//! Application builder: wires state, router, and listener together.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use foodgate_auth::{InMemoryUserDirectory, PasswordCredentialVerifier, UserLookup};
use foodgate_core::{AppError, AppResult};
use foodgate_core::config::AppConfig;

use crate::router::build_router;
use crate::state::AppState;

/// Builds state backed by the in-memory directory seeded from `config.users`.
pub fn build_state(config: AppConfig) -> AppResult<AppState> {
    let directory = InMemoryUserDirectory::from_seeds(&config.users);
    tracing::info!(users = directory.len(), "User directory loaded");

    let users: Arc<dyn UserLookup> = Arc::new(directory);
    let credentials = Arc::new(PasswordCredentialVerifier::new(Arc::clone(&users)));
    AppState::new(config, users, credentials)
}

/// Builds the complete Axum application.
pub fn build_app(config: AppConfig) -> AppResult<Router> {
    Ok(build_router(build_state(config)?))
}

/// Runs the Foodgate server until Ctrl-C.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting Foodgate server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_app(config)?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(address = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
