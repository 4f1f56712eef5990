//! Per-request authentication gate.
//!
//! The gate turns an optional `Authorization` header into an
//! [`AuthenticationOutcome`]. It never fails a request: every problem
//! with the credential degrades to `Unauthenticated` plus a log entry,
//! and downstream authorization decides what anonymous callers may do.

pub mod public_paths;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use foodgate_core::AppError;
use foodgate_core::config::{AuthConfig, AuthoritySource};

use crate::directory::{UserLookup, UserRecord};
use crate::error::AuthError;
use crate::hierarchy::HierarchyIndex;
use crate::jwt::{DecodeOutcome, TokenLifecycleManager, TokenType};
use crate::principal::{AuthenticationOutcome, Principal, UnauthenticatedReason};

pub use public_paths::PublicPathMatcher;

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

/// Why the directory could not produce a user.
enum LookupFailure {
    TimedOut,
    Failed(AppError),
}

/// Authenticates requests from their bearer credential.
///
/// Holds only immutable, process-wide state; a single instance serves all
/// requests concurrently.
#[derive(Clone)]
pub struct AuthenticationGate {
    lifecycle: Arc<TokenLifecycleManager>,
    users: Arc<dyn UserLookup>,
    hierarchy: Arc<HierarchyIndex>,
    public_paths: PublicPathMatcher,
    authority_source: AuthoritySource,
    lookup_timeout: Duration,
}

impl std::fmt::Debug for AuthenticationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationGate")
            .field("public_paths", &self.public_paths)
            .field("authority_source", &self.authority_source)
            .field("lookup_timeout", &self.lookup_timeout)
            .finish()
    }
}

impl AuthenticationGate {
    /// Creates a gate from its collaborators and auth configuration.
    pub fn new(
        lifecycle: Arc<TokenLifecycleManager>,
        users: Arc<dyn UserLookup>,
        hierarchy: Arc<HierarchyIndex>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            lifecycle,
            users,
            hierarchy,
            public_paths: PublicPathMatcher::new(&config.public_paths),
            authority_source: config.authority_source,
            lookup_timeout: Duration::from_millis(config.user_lookup_timeout_ms),
        }
    }

    /// Whether `path` bypasses authentication.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.is_public(path)
    }

    /// Authenticates one request.
    pub async fn authenticate(&self, path: &str, authorization: Option<&str>) -> AuthenticationOutcome {
        self.authenticate_at(path, authorization, Utc::now()).await
    }

    /// Authenticates one request as of `now`.
    ///
    /// Steps run strictly in order: classify, check type, look up the
    /// user, resolve authorities.
    pub async fn authenticate_at(
        &self,
        path: &str,
        authorization: Option<&str>,
        now: DateTime<Utc>,
    ) -> AuthenticationOutcome {
        use AuthenticationOutcome::Unauthenticated;

        if self.is_public(path) {
            return Unauthenticated(UnauthenticatedReason::PublicPath);
        }

        let Some(token) = authorization.and_then(bearer_token) else {
            return Unauthenticated(UnauthenticatedReason::NoCredentials);
        };

        let claims = match self.lifecycle.inspect_at(token, now) {
            DecodeOutcome::Valid(claims) => claims,
            DecodeOutcome::Expired(claims) => {
                debug!(username = %claims.sub, path = %path, "Expired bearer token");
                return Unauthenticated(UnauthenticatedReason::Expired);
            }
            DecodeOutcome::Malformed(reason) => {
                debug!(path = %path, reason = %reason, "Malformed bearer token");
                return Unauthenticated(UnauthenticatedReason::Malformed);
            }
        };

        if claims.token_type != TokenType::Access {
            debug!(
                username = %claims.sub,
                path = %path,
                "Refresh token presented as bearer credential, ignoring"
            );
            return Unauthenticated(UnauthenticatedReason::WrongTokenType);
        }

        let user = match self.fetch_user(&claims.sub).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(username = %claims.sub, "Token subject no longer exists");
                return Unauthenticated(UnauthenticatedReason::UnknownSubject);
            }
            Err(LookupFailure::TimedOut) => {
                warn!(
                    username = %claims.sub,
                    timeout_ms = self.lookup_timeout.as_millis() as u64,
                    "User lookup timed out"
                );
                return Unauthenticated(UnauthenticatedReason::LookupTimedOut);
            }
            Err(LookupFailure::Failed(e)) => {
                warn!(username = %claims.sub, error = %e, "User lookup failed");
                return Unauthenticated(UnauthenticatedReason::LookupFailed);
            }
        };

        if !user.flags.is_usable() {
            debug!(username = %user.username, "Account is not usable");
            return Unauthenticated(UnauthenticatedReason::AccountUnavailable);
        }

        let authorities = match self.authority_source {
            AuthoritySource::Lookup => self.hierarchy.resolve_authorities(&user.roles),
            AuthoritySource::Token => claims.authority_set(),
        };

        debug!(username = %user.username, authorities = authorities.len(), "Request authenticated");
        AuthenticationOutcome::Authenticated(Principal::new(user.username, authorities, user.flags))
    }

    /// Loads a usable principal with authorities resolved from current roles.
    ///
    /// Used at login and refresh, where authorities are never taken from a token.
    pub async fn load_principal(&self, username: &str) -> Result<Principal, AuthError> {
        let user = match self.fetch_user(username).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(AuthError::UnknownSubject(username.to_string())),
            Err(LookupFailure::TimedOut) => {
                return Err(AuthError::Lookup(format!(
                    "no answer within {}ms",
                    self.lookup_timeout.as_millis()
                )));
            }
            Err(LookupFailure::Failed(e)) => return Err(AuthError::Lookup(e.to_string())),
        };

        if !user.flags.is_usable() {
            return Err(AuthError::AccountUnavailable(user.username));
        }

        let authorities = self.hierarchy.resolve_authorities(&user.roles);
        Ok(Principal::new(user.username, authorities, user.flags))
    }

    async fn fetch_user(&self, username: &str) -> Result<Option<UserRecord>, LookupFailure> {
        match tokio::time::timeout(self.lookup_timeout, self.users.by_username(username)).await {
            Ok(Ok(user)) => Ok(user),
            Ok(Err(e)) => Err(LookupFailure::Failed(e)),
            Err(_) => Err(LookupFailure::TimedOut),
        }
    }
}
