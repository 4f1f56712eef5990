//! Authentication configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the gate takes a principal's authorities from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthoritySource {
    /// Re-resolve the user's current roles through the hierarchy on every request.
    #[default]
    Lookup,
    /// Trust the `authorities` claim embedded in the access token.
    Token,
}

/// Token issuance and validation configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base64-encoded HMAC-SHA256 signing secret.
    #[serde(default)]
    pub signing_secret: String,
    /// Access token TTL in milliseconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_ms: u64,
    /// Refresh token TTL in milliseconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_ms: u64,
    /// Tolerated issuer/verifier clock drift when checking expiry.
    #[serde(default = "default_clock_skew")]
    pub clock_skew_seconds: u64,
    /// Paths that bypass the authentication gate.
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
    /// Trust boundary for request authorities.
    #[serde(default)]
    pub authority_source: AuthoritySource,
    /// Deadline for the user lookup performed by the gate.
    #[serde(default = "default_lookup_timeout")]
    pub user_lookup_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_secret: String::new(),
            access_token_ttl_ms: default_access_ttl(),
            refresh_token_ttl_ms: default_refresh_ttl(),
            clock_skew_seconds: default_clock_skew(),
            public_paths: default_public_paths(),
            authority_source: AuthoritySource::default(),
            user_lookup_timeout_ms: default_lookup_timeout(),
        }
    }
}

// The secret must never reach the logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_secret", &"<redacted>")
            .field("access_token_ttl_ms", &self.access_token_ttl_ms)
            .field("refresh_token_ttl_ms", &self.refresh_token_ttl_ms)
            .field("clock_skew_seconds", &self.clock_skew_seconds)
            .field("public_paths", &self.public_paths)
            .field("authority_source", &self.authority_source)
            .field("user_lookup_timeout_ms", &self.user_lookup_timeout_ms)
            .finish()
    }
}

fn default_access_ttl() -> u64 {
    15 * 60 * 1000
}

fn default_refresh_ttl() -> u64 {
    7 * 24 * 60 * 60 * 1000
}

fn default_clock_skew() -> u64 {
    300
}

fn default_public_paths() -> Vec<String> {
    vec![
        "/auth/authenticate".to_string(),
        "/auth/refresh".to_string(),
        "/auth/health".to_string(),
        "/auth/logout".to_string(),
    ]
}

fn default_lookup_timeout() -> u64 {
    2000
}
