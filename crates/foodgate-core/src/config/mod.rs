//! Application configuration schemas.
//!
//! All configuration structs are deserialized from a TOML file via the
//! `config` crate, overlaid with `FOODGATE__`-prefixed environment
//! variables. Each sub-module represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod hierarchy;
pub mod logging;
pub mod users;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, AuthoritySource};
pub use self::hierarchy::{HierarchyConfig, RoleConfig};
pub use self::logging::LoggingConfig;
pub use self::users::UserSeedConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Token and gate settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Role hierarchy table (empty means the shipped hierarchy).
    #[serde(default)]
    pub hierarchy: HierarchyConfig,
    /// Seed records for the in-memory user directory.
    #[serde(default)]
    pub users: Vec<UserSeedConfig>,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional; environment variables such as
    /// `FOODGATE__AUTH__SIGNING_SECRET` override file values.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("FOODGATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
