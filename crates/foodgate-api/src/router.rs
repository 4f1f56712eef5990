//! Route definitions for the Foodgate HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor. Every request passes through the authentication gate.

use std::time::Duration;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .merge(auth_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authentication_gate,
        ))
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth endpoints: authenticate, refresh, validate, logout, me, health
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/authenticate", post(handlers::auth::authenticate))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/validate", get(handlers::auth::validate))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/health", get(handlers::health::health))
}
