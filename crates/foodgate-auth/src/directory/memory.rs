//! In-memory user directory seeded from configuration.

use std::collections::HashMap;

use async_trait::async_trait;

use foodgate_core::AppError;
use foodgate_core::config::UserSeedConfig;

use crate::principal::AccountFlags;

use super::lookup::{UserLookup, UserRecord};

/// Read-only directory keyed by username.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: HashMap<String, UserRecord>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the directory from seed records. Later duplicates replace earlier ones.
    pub fn from_seeds(seeds: &[UserSeedConfig]) -> Self {
        seeds
            .iter()
            .map(|seed| UserRecord {
                username: seed.username.clone(),
                password_hash: seed.password_hash.clone(),
                roles: seed.roles.clone(),
                flags: AccountFlags {
                    enabled: seed.enabled,
                    locked: seed.account_locked,
                    expired: seed.account_expired,
                    credentials_expired: seed.credentials_expired,
                },
            })
            .fold(Self::new(), Self::with_user)
    }

    /// Adds or replaces a user.
    pub fn with_user(mut self, user: UserRecord) -> Self {
        self.users.insert(user.username.clone(), user);
        self
    }

    /// Number of known users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserLookup for InMemoryUserDirectory {
    async fn by_username(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.get(username).cloned())
    }
}
