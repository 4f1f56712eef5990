//! Token wire codec: `header.payload.signature`, HMAC-SHA256.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};

use crate::error::AuthError;

use super::claims::Claims;
use super::key::SigningKey;

/// Result of decoding a token string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Signature verified and not expired.
    Valid(Claims),
    /// Signature verified but past expiry. Claims are usable for bookkeeping only.
    Expired(Claims),
    /// Bad segments, bad base64/JSON, or signature mismatch.
    Malformed(String),
}

impl DecodeOutcome {
    /// Claims of a structurally trustworthy token, expired or not.
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Self::Valid(claims) | Self::Expired(claims) => Some(claims),
            Self::Malformed(_) => None,
        }
    }
}

/// Signs and verifies tokens with a single symmetric key.
///
/// Pure: holds only the key, the verification settings, and the skew
/// tolerance, all immutable after construction.
#[derive(Clone)]
pub struct TokenCodec {
    key: SigningKey,
    validation: Validation,
    clock_skew_seconds: i64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("key", &self.key)
            .field("clock_skew_seconds", &self.clock_skew_seconds)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec with the given key and expiry tolerance.
    pub fn new(key: SigningKey, clock_skew_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is classified here, not inside jsonwebtoken, so that an
        // expired token still yields its claims.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key,
            validation,
            clock_skew_seconds: i64::try_from(clock_skew_seconds).unwrap_or(i64::MAX),
        }
    }

    /// Configured expiry tolerance in seconds.
    pub fn clock_skew_seconds(&self) -> i64 {
        self.clock_skew_seconds
    }

    /// Serializes and signs the claims.
    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, self.key.encoding())
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    /// Decodes a token against the current time.
    pub fn decode(&self, token: &str) -> DecodeOutcome {
        self.decode_at(token, Utc::now())
    }

    /// Decodes a token against `now`.
    ///
    /// The signature is checked before anything else; a token is expired
    /// once `now` reaches `exp` plus the skew tolerance.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> DecodeOutcome {
        let claims = match decode::<Claims>(token, self.key.decoding(), &self.validation) {
            Ok(data) => data.claims,
            Err(e) => return DecodeOutcome::Malformed(describe(e.kind())),
        };

        if claims.exp <= claims.iat {
            return DecodeOutcome::Malformed("expiry does not follow issue time".to_string());
        }

        if now.timestamp() >= claims.exp.saturating_add(self.clock_skew_seconds) {
            DecodeOutcome::Expired(claims)
        } else {
            DecodeOutcome::Valid(claims)
        }
    }
}

fn describe(kind: &JwtErrorKind) -> String {
    match kind {
        JwtErrorKind::InvalidToken => "invalid token structure".to_string(),
        JwtErrorKind::InvalidSignature => "signature mismatch".to_string(),
        JwtErrorKind::InvalidAlgorithm | JwtErrorKind::InvalidAlgorithmName => {
            "unexpected signing algorithm".to_string()
        }
        JwtErrorKind::MissingRequiredClaim(claim) => format!("missing claim '{claim}'"),
        JwtErrorKind::Base64(_) => "invalid base64 segment".to_string(),
        JwtErrorKind::Json(_) => "invalid claims payload".to_string(),
        JwtErrorKind::Utf8(_) => "invalid UTF-8 in payload".to_string(),
        other => format!("token rejected: {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(SigningKey::from_bytes(&[42u8; 32]).unwrap(), 300)
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_decode_returns_encoded_claims() {
        let codec = codec();
        let claims = Claims::access(
            "alice",
            BTreeSet::from(["VIEW_DISH".to_string(), "ROLE_GUEST".to_string()]),
            1_000,
            1_900,
        );
        let token = codec.encode(&claims).unwrap();

        assert_eq!(token.split('.').count(), 3);
        assert_eq!(codec.decode_at(&token, at(1_500)), DecodeOutcome::Valid(claims));
    }

    #[test]
    fn test_expired_token_keeps_claims() {
        let codec = codec();
        let claims = Claims::refresh("alice", 1_000, 2_000);
        let token = codec.encode(&claims).unwrap();

        match codec.decode_at(&token, at(10_000)) {
            DecodeOutcome::Expired(decoded) => assert_eq!(decoded.sub, "alice"),
            other => panic!("expected Expired, got {other:?}"),
        }
    }

    #[test]
    fn test_clock_skew_extends_validity() {
        let codec = codec();
        let token = codec.encode(&Claims::refresh("alice", 1_000, 2_000)).unwrap();

        assert!(matches!(codec.decode_at(&token, at(2_100)), DecodeOutcome::Valid(_)));
        assert!(matches!(codec.decode_at(&token, at(2_299)), DecodeOutcome::Valid(_)));
        assert!(matches!(codec.decode_at(&token, at(2_300)), DecodeOutcome::Expired(_)));
    }

    #[test]
    fn test_tampered_signature_is_malformed() {
        let codec = codec();
        let token = codec.encode(&Claims::refresh("alice", 1_000, 2_000)).unwrap();
        let (body, signature) = token.rsplit_once('.').unwrap();

        for index in 0..signature.len() {
            let mut bytes = signature.as_bytes().to_vec();
            bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
            let tampered = format!("{body}.{}", String::from_utf8(bytes).unwrap());
            assert!(
                matches!(codec.decode_at(&tampered, at(1_500)), DecodeOutcome::Malformed(_)),
                "byte {index} altered but token still accepted"
            );
        }
    }

    #[test]
    fn test_foreign_key_is_malformed() {
        let token = codec().encode(&Claims::refresh("alice", 1_000, 2_000)).unwrap();
        let other = TokenCodec::new(SigningKey::from_bytes(&[1u8; 32]).unwrap(), 300);
        assert!(matches!(other.decode_at(&token, at(1_500)), DecodeOutcome::Malformed(_)));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = codec();
        for input in ["", "abc", "a.b", "a.b.c", "a.b.c.d", "....."] {
            assert!(
                matches!(codec.decode_at(input, at(1_500)), DecodeOutcome::Malformed(_)),
                "{input:?} was not rejected"
            );
        }
    }

    #[test]
    fn test_non_increasing_expiry_is_malformed() {
        let codec = codec();
        let token = codec.encode(&Claims::refresh("alice", 2_000, 2_000)).unwrap();
        assert!(matches!(codec.decode_at(&token, at(1_500)), DecodeOutcome::Malformed(_)));
    }
}
