//! JWT claims carried by access and refresh tokens.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims payload: `{sub, type, authorities?, iat, exp}` with epoch-second timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username.
    pub sub: String,
    /// Token type. Fixed at issuance.
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Authorities granted at issuance. Present on access tokens only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorities: Option<BTreeSet<String>>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenType {
    /// Short-lived bearer credential.
    Access,
    /// Long-lived token accepted only by the refresh endpoint.
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Access => write!(f, "ACCESS"),
            Self::Refresh => write!(f, "REFRESH"),
        }
    }
}

impl Claims {
    /// Builds access-token claims.
    pub fn access(sub: impl Into<String>, authorities: BTreeSet<String>, iat: i64, exp: i64) -> Self {
        Self {
            sub: sub.into(),
            token_type: TokenType::Access,
            authorities: Some(authorities),
            iat,
            exp,
        }
    }

    /// Builds refresh-token claims. Refresh tokens never carry authorities.
    pub fn refresh(sub: impl Into<String>, iat: i64, exp: i64) -> Self {
        Self {
            sub: sub.into(),
            token_type: TokenType::Refresh,
            authorities: None,
            iat,
            exp,
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Milliseconds left before `exp` at `now`, floored at zero.
    pub fn remaining_millis_at(&self, now: DateTime<Utc>) -> u64 {
        let remaining = self.exp.saturating_mul(1000) - now.timestamp_millis();
        if remaining > 0 { remaining as u64 } else { 0 }
    }

    /// Authorities embedded in the token, empty for refresh tokens.
    pub fn authority_set(&self) -> BTreeSet<String> {
        self.authorities.clone().unwrap_or_default()
    }
}
