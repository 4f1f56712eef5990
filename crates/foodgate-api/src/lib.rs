//! # foodgate-api
//!
//! HTTP API layer for Foodgate built on Axum.
//!
//! Provides the `/auth/*` endpoints, the authentication gate middleware,
//! principal extractors, route-level privilege guards, DTOs, and error
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
