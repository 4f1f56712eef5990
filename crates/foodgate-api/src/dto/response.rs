//! Response DTOs.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodgate_auth::Principal;

/// Token scheme reported to clients.
pub const BEARER: &str = "Bearer";

/// Successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponse {
    /// Access token.
    pub token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Always `"Bearer"`.
    #[serde(rename = "type")]
    pub token_type: String,
    /// Authenticated username.
    pub username: String,
    /// Role authorities and privileges.
    pub authorities: Vec<String>,
    /// Access token lifetime in milliseconds.
    pub expires_in: u64,
}

/// Successful refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    /// New access token.
    pub token: String,
    /// Always `"Bearer"`.
    #[serde(rename = "type")]
    pub token_type: String,
    /// Access token lifetime in milliseconds.
    pub expires_in: u64,
}

/// Result of `/auth/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidationResponse {
    /// Whether the token is currently valid.
    pub valid: bool,
    /// Token subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Milliseconds until expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_validity_ms: Option<u64>,
    /// Authorities embedded in the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorities: Option<Vec<String>>,
    /// Why the token is not valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TokenValidationResponse {
    /// A valid token.
    pub fn valid(username: String, remaining_validity_ms: u64, authorities: BTreeSet<String>) -> Self {
        Self {
            valid: true,
            username: Some(username),
            remaining_validity_ms: Some(remaining_validity_ms),
            authorities: Some(authorities.into_iter().collect()),
            message: None,
        }
    }

    /// An invalid token.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            username: None,
            remaining_validity_ms: None,
            authorities: None,
            message: Some(message.into()),
        }
    }
}

/// Logout acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Message.
    pub message: String,
    /// Always `true`.
    pub success: bool,
}

/// The current principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    /// Username.
    pub username: String,
    /// Role authorities and privileges.
    pub authorities: Vec<String>,
    /// Account enabled.
    pub enabled: bool,
    /// Account not expired.
    pub account_non_expired: bool,
    /// Account not locked.
    pub account_non_locked: bool,
    /// Credentials not expired.
    pub credentials_non_expired: bool,
}

impl From<&Principal> for CurrentUserResponse {
    fn from(principal: &Principal) -> Self {
        Self {
            username: principal.username.clone(),
            authorities: principal.authorities.iter().cloned().collect(),
            enabled: principal.account.enabled,
            account_non_expired: !principal.account.expired,
            account_non_locked: !principal.account.locked,
            credentials_non_expired: !principal.account.credentials_expired,
        }
    }
}

/// Health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"UP"` while serving.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}
