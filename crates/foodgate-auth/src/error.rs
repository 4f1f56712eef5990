//! Authentication error taxonomy.

use foodgate_core::AppError;

use crate::jwt::TokenType;

/// Failures raised by token handling, hierarchy construction, and the
/// directory collaborators.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Bad structure or signature. The token's claims must not be trusted.
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// Signature valid but the token has lapsed.
    #[error("Token has expired")]
    Expired,

    /// The token's type does not fit the operation attempted.
    #[error("Wrong token type: expected {expected}, got {actual}")]
    WrongTokenType {
        /// Type the operation requires.
        expected: TokenType,
        /// Type carried by the token.
        actual: TokenType,
    },

    /// The token's subject no longer exists.
    #[error("Unknown subject '{0}'")]
    UnknownSubject(String),

    /// Username/password did not match.
    #[error("Invalid credentials")]
    CredentialsInvalid,

    /// The account is disabled, locked, or expired.
    #[error("Account '{0}' is not usable")]
    AccountUnavailable(String),

    /// Fatal startup misconfiguration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Claims could not be serialized or signed.
    #[error("Token encoding failed: {0}")]
    Encoding(String),

    /// The user directory failed or timed out.
    #[error("User lookup failed: {0}")]
    Lookup(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::Malformed(_) | AuthError::UnknownSubject(_) => {
                AppError::authentication(message).with_code("INVALID_TOKEN")
            }
            AuthError::Expired => AppError::authentication(message).with_code("INVALID_TOKEN"),
            AuthError::WrongTokenType { .. } => {
                AppError::validation(message).with_code("WRONG_TOKEN_TYPE")
            }
            AuthError::CredentialsInvalid | AuthError::AccountUnavailable(_) => {
                AppError::authentication(message).with_code("AUTH_FAILED")
            }
            AuthError::Configuration(_) => AppError::configuration(message),
            AuthError::Encoding(_) | AuthError::Lookup(_) => AppError::internal(message),
        }
    }
}
