//! Seed records for the in-memory user directory.

use serde::{Deserialize, Serialize};

/// A user record loaded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSeedConfig {
    /// Login name.
    pub username: String,
    /// Argon2 PHC string (see `foodgate-server hash-password`).
    pub password_hash: String,
    /// Assigned role names.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Whether the account may log in at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Locked by an administrator.
    #[serde(default)]
    pub account_locked: bool,
    /// Account validity has lapsed.
    #[serde(default)]
    pub account_expired: bool,
    /// Password must be changed before use.
    #[serde(default)]
    pub credentials_expired: bool,
}

fn default_true() -> bool {
    true
}
