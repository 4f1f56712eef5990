//! Token issuance and classification.

use chrono::{DateTime, Utc};
use foodgate_core::config::AuthConfig;

use crate::error::AuthError;
use crate::principal::Principal;

use super::claims::{Claims, TokenType};
use super::codec::{DecodeOutcome, TokenCodec};
use super::key::SigningKey;

/// Validity classification of an immutable token string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Signature verified, not expired.
    WellFormedValid,
    /// Signature verified, expired.
    WellFormedExpired,
    /// Not a token issued with our key.
    Malformed,
}

impl From<&DecodeOutcome> for TokenState {
    fn from(outcome: &DecodeOutcome) -> Self {
        match outcome {
            DecodeOutcome::Valid(_) => Self::WellFormedValid,
            DecodeOutcome::Expired(_) => Self::WellFormedExpired,
            DecodeOutcome::Malformed(_) => Self::Malformed,
        }
    }
}

/// Builds access/refresh tokens and classifies presented ones.
#[derive(Debug, Clone)]
pub struct TokenLifecycleManager {
    codec: TokenCodec,
    access_ttl_ms: u64,
    refresh_ttl_ms: u64,
}

impl TokenLifecycleManager {
    /// Creates a manager from auth configuration.
    ///
    /// Fails with [`AuthError::Configuration`] when the secret is missing,
    /// not base64, or too short, or when a TTL is under one second.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let key = SigningKey::from_base64(&config.signing_secret)?;
        Self::with_key(
            key,
            config.access_token_ttl_ms,
            config.refresh_token_ttl_ms,
            config.clock_skew_seconds,
        )
    }

    /// Creates a manager from an already-built key.
    pub fn with_key(
        key: SigningKey,
        access_ttl_ms: u64,
        refresh_ttl_ms: u64,
        clock_skew_seconds: u64,
    ) -> Result<Self, AuthError> {
        // iat/exp have second granularity; shorter TTLs would yield exp == iat.
        for (name, ttl) in [
            ("access_token_ttl_ms", access_ttl_ms),
            ("refresh_token_ttl_ms", refresh_ttl_ms),
        ] {
            if ttl < 1000 {
                return Err(AuthError::Configuration(format!(
                    "auth.{name} must be at least 1000, got {ttl}"
                )));
            }
        }

        Ok(Self {
            codec: TokenCodec::new(key, clock_skew_seconds),
            access_ttl_ms,
            refresh_ttl_ms,
        })
    }

    /// Access token lifetime in milliseconds.
    pub fn access_ttl_ms(&self) -> u64 {
        self.access_ttl_ms
    }

    /// Refresh token lifetime in milliseconds.
    pub fn refresh_ttl_ms(&self) -> u64 {
        self.refresh_ttl_ms
    }

    /// The underlying codec.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Issues an access token carrying the principal's authorities.
    pub fn issue_access_token(&self, principal: &Principal) -> Result<String, AuthError> {
        self.issue_access_token_at(principal, Utc::now())
    }

    /// Issues an access token as of `now`.
    pub fn issue_access_token_at(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let (iat, exp) = window(now, self.access_ttl_ms);
        let claims = Claims::access(&principal.username, principal.authorities.clone(), iat, exp);
        self.codec.encode(&claims)
    }

    /// Issues a refresh token. Authorities are re-resolved when it is redeemed.
    pub fn issue_refresh_token(&self, username: &str) -> Result<String, AuthError> {
        self.issue_refresh_token_at(username, Utc::now())
    }

    /// Issues a refresh token as of `now`.
    pub fn issue_refresh_token_at(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let (iat, exp) = window(now, self.refresh_ttl_ms);
        self.codec.encode(&Claims::refresh(username, iat, exp))
    }

    /// Decodes the token, returning the claims where trustworthy.
    pub fn inspect(&self, token: &str) -> DecodeOutcome {
        self.codec.decode(token)
    }

    /// Decodes the token as of `now`.
    pub fn inspect_at(&self, token: &str, now: DateTime<Utc>) -> DecodeOutcome {
        self.codec.decode_at(token, now)
    }

    /// Classifies the token, tolerating the configured clock skew.
    pub fn classify(&self, token: &str) -> TokenState {
        self.classify_at(token, Utc::now())
    }

    /// Classifies the token as of `now`.
    pub fn classify_at(&self, token: &str, now: DateTime<Utc>) -> TokenState {
        TokenState::from(&self.codec.decode_at(token, now))
    }

    /// Subject of a valid token. Expired and malformed tokens are rejected.
    pub fn extract_username(&self, token: &str) -> Result<String, AuthError> {
        match self.codec.decode(token) {
            DecodeOutcome::Valid(claims) => Ok(claims.sub),
            DecodeOutcome::Expired(_) => Err(AuthError::Expired),
            DecodeOutcome::Malformed(reason) => Err(AuthError::Malformed(reason)),
        }
    }

    /// Subject of a signed token even after it expired.
    ///
    /// Only for refresh and logout bookkeeping.
    pub fn extract_username_ignoring_expiration(&self, token: &str) -> Result<String, AuthError> {
        match self.codec.decode(token) {
            DecodeOutcome::Valid(claims) | DecodeOutcome::Expired(claims) => Ok(claims.sub),
            DecodeOutcome::Malformed(reason) => Err(AuthError::Malformed(reason)),
        }
    }

    /// The `type` claim of a signed token, expired or not.
    pub fn token_type(&self, token: &str) -> Option<TokenType> {
        self.codec.decode(token).claims().map(|c| c.token_type)
    }

    /// Whether the token is a signed ACCESS token.
    pub fn is_access_token(&self, token: &str) -> bool {
        self.token_type(token) == Some(TokenType::Access)
    }

    /// Whether the token is a signed REFRESH token.
    pub fn is_refresh_token(&self, token: &str) -> bool {
        self.token_type(token) == Some(TokenType::Refresh)
    }

    /// Milliseconds until expiry; `0` for expired or malformed tokens.
    pub fn remaining_validity(&self, token: &str) -> u64 {
        self.remaining_validity_at(token, Utc::now())
    }

    /// Milliseconds until expiry as of `now`.
    pub fn remaining_validity_at(&self, token: &str, now: DateTime<Utc>) -> u64 {
        match self.codec.decode_at(token, now) {
            DecodeOutcome::Valid(claims) => claims.remaining_millis_at(now),
            DecodeOutcome::Expired(_) | DecodeOutcome::Malformed(_) => 0,
        }
    }

    /// Whether the token belongs to `username` and is strictly unexpired.
    ///
    /// Unlike [`classify`](Self::classify) no skew tolerance applies.
    pub fn validate_for_user(&self, token: &str, username: &str) -> bool {
        self.validate_for_user_at(token, username, Utc::now())
    }

    /// Strict validation as of `now`.
    pub fn validate_for_user_at(&self, token: &str, username: &str, now: DateTime<Utc>) -> bool {
        match self.codec.decode_at(token, now).claims() {
            Some(claims) => claims.sub == username && claims.exp > now.timestamp(),
            None => false,
        }
    }
}

/// `(iat, exp)` in epoch seconds for a token issued at `now`.
///
/// `exp` is rounded up to the next whole second, so a fresh token never
/// reports less than its full TTL and at most 999 ms more.
fn window(now: DateTime<Utc>, ttl_ms: u64) -> (i64, i64) {
    let iat = now.timestamp();
    let ttl_ms = i64::try_from(ttl_ms).unwrap_or(i64::MAX);
    let exp_ms = now.timestamp_millis().saturating_add(ttl_ms);
    let exp = exp_ms.div_euclid(1000) + i64::from(exp_ms.rem_euclid(1000) != 0);
    (iat, exp)
}
