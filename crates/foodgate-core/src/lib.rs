//! # foodgate-core
//!
//! Core crate for Foodgate. Contains the configuration schema and loader,
//! and the unified error system shared by the auth and API crates.
//!
//! This crate has **no** internal dependencies on other Foodgate crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
