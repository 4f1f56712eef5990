//! Credential verification boundary.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use foodgate_core::AppError;

use crate::password::PasswordHasher;

use super::lookup::UserLookup;

/// Checks a username/password pair.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + 'static {
    /// `Ok(true)` when the password matches the user's credential.
    async fn check(&self, username: &str, password: &str) -> Result<bool, AppError>;
}

/// Verifies passwords against the Argon2 hashes held by a [`UserLookup`].
#[derive(Clone)]
pub struct PasswordCredentialVerifier {
    users: Arc<dyn UserLookup>,
    hasher: PasswordHasher,
}

impl std::fmt::Debug for PasswordCredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredentialVerifier").finish()
    }
}

impl PasswordCredentialVerifier {
    /// Creates a verifier over the given directory.
    pub fn new(users: Arc<dyn UserLookup>) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for PasswordCredentialVerifier {
    async fn check(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let Some(user) = self.users.by_username(username).await? else {
            return Ok(false);
        };

        match self.hasher.verify_password(password, &user.password_hash) {
            Ok(matches) => Ok(matches),
            Err(e) => {
                warn!(username = %username, error = %e, "Stored password hash is unusable");
                Ok(false)
            }
        }
    }
}
