//! HMAC signing key loaded from the configured base64 secret.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::error::AuthError;

/// Minimum secret length for HS256.
pub const MIN_KEY_BYTES: usize = 32;

/// Symmetric key used to sign and verify tokens.
///
/// Built once at startup and shared read-only. The raw bytes are never
/// exposed and `Debug` output is redacted.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Decodes a base64 secret and builds the key.
    pub fn from_base64(secret: &str) -> Result<Self, AuthError> {
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(AuthError::Configuration(
                "auth.signing_secret is not set".to_string(),
            ));
        }

        let bytes = STANDARD.decode(secret).map_err(|e| {
            AuthError::Configuration(format!("auth.signing_secret is not valid base64: {e}"))
        })?;

        Self::from_bytes(&bytes)
    }

    /// Builds the key from raw secret bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AuthError> {
        if bytes.len() < MIN_KEY_BYTES {
            return Err(AuthError::Configuration(format!(
                "signing secret must be at least {MIN_KEY_BYTES} bytes, got {}",
                bytes.len()
            )));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        })
    }

    pub(crate) fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}
