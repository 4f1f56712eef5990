//! User lookup boundary.

use async_trait::async_trait;

use foodgate_core::AppError;

use crate::principal::AccountFlags;

/// A user as known to the directory at lookup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Login name.
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Currently assigned role names.
    pub roles: Vec<String>,
    /// Account status.
    pub flags: AccountFlags,
}

/// Loads a user's current roles and account flags.
///
/// Implementations are shared across requests and must be safe for
/// concurrent use.
#[async_trait]
pub trait UserLookup: Send + Sync + 'static {
    /// Finds a user by username; `Ok(None)` when unknown.
    async fn by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError>;
}
