//! The authenticated identity bound to one request.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Account status flags reported by the user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFlags {
    /// Whether the account may log in at all.
    pub enabled: bool,
    /// Locked by an administrator.
    pub locked: bool,
    /// Account validity has lapsed.
    pub expired: bool,
    /// Password must be changed before use.
    pub credentials_expired: bool,
}

impl Default for AccountFlags {
    fn default() -> Self {
        Self {
            enabled: true,
            locked: false,
            expired: false,
            credentials_expired: false,
        }
    }
}

impl AccountFlags {
    /// Whether none of the flags forbids authentication.
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.locked && !self.expired && !self.credentials_expired
    }
}

/// An authenticated user and the authorities resolved for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Login name (the token subject).
    pub username: String,
    /// Role authorities plus privilege closure.
    pub authorities: BTreeSet<String>,
    /// Account status at lookup time.
    pub account: AccountFlags,
}

impl Principal {
    /// Creates a principal.
    pub fn new(
        username: impl Into<String>,
        authorities: BTreeSet<String>,
        account: AccountFlags,
    ) -> Self {
        Self {
            username: username.into(),
            authorities,
            account,
        }
    }

    /// Whether the authority set contains `authority`.
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }
}

/// Why a request was left unauthenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthenticatedReason {
    /// The path is on the public allowlist.
    PublicPath,
    /// No `Authorization: Bearer` header.
    NoCredentials,
    /// Bad structure or signature.
    Malformed,
    /// Signed but expired.
    Expired,
    /// A refresh token presented as a bearer credential.
    WrongTokenType,
    /// The subject is unknown to the user directory.
    UnknownSubject,
    /// The account is disabled, locked, or expired.
    AccountUnavailable,
    /// The user directory returned an error.
    LookupFailed,
    /// The user directory did not answer before the deadline.
    LookupTimedOut,
}

/// Result of authenticating one request. Failure is a value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationOutcome {
    /// A principal was established.
    Authenticated(Principal),
    /// The request continues anonymously.
    Unauthenticated(UnauthenticatedReason),
}

impl AuthenticationOutcome {
    /// The principal, if authenticated.
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Authenticated(principal) => Some(principal),
            Self::Unauthenticated(_) => None,
        }
    }

    /// Consumes the outcome, yielding the principal if any.
    pub fn into_principal(self) -> Option<Principal> {
        match self {
            Self::Authenticated(principal) => Some(principal),
            Self::Unauthenticated(_) => None,
        }
    }
}
