//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::{AuthUser, CurrentPrincipal};
pub use json::JsonBody;
