//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthenticationRequest {
    /// Username.
    #[validate(custom(function = "not_blank", message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(custom(function = "not_blank", message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    /// Refresh token.
    pub refresh_token: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
