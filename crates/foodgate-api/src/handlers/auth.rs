//! Auth handlers: authenticate, refresh, validate, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use tracing::{debug, info, warn};
use validator::Validate;

use foodgate_auth::gate::bearer_token;
use foodgate_auth::{AuthError, DecodeOutcome, TokenType};
use foodgate_core::AppError;
use foodgate_core::config::AuthoritySource;

use crate::dto::request::{AuthenticationRequest, RefreshTokenRequest};
use crate::dto::response::{
    AuthenticationResponse, BEARER, CurrentUserResponse, LogoutResponse, RefreshTokenResponse,
    TokenValidationResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

fn auth_failed() -> AppError {
    AppError::authentication("Invalid username or password").with_code("AUTH_FAILED")
}

fn bearer_from(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
}

/// POST /auth/authenticate
pub async fn authenticate(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AuthenticationRequest>,
) -> Result<Json<AuthenticationResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid login request: {e}")))?;

    if !state.credentials.check(&req.username, &req.password).await? {
        warn!(username = %req.username, "Authentication failed: bad credentials");
        return Err(auth_failed().into());
    }

    let principal = match state.gate.load_principal(&req.username).await {
        Ok(principal) => principal,
        Err(AuthError::AccountUnavailable(_) | AuthError::UnknownSubject(_)) => {
            warn!(username = %req.username, "Authentication failed: account unusable");
            return Err(auth_failed().into());
        }
        Err(e) => return Err(e.into()),
    };

    let token = state.lifecycle.issue_access_token(&principal)?;
    let refresh_token = state.lifecycle.issue_refresh_token(&principal.username)?;

    info!(username = %principal.username, "User authenticated");

    Ok(Json(AuthenticationResponse {
        token,
        refresh_token,
        token_type: BEARER.to_string(),
        username: principal.username,
        authorities: principal.authorities.into_iter().collect(),
        expires_in: state.lifecycle.access_ttl_ms(),
    }))
}

/// POST /auth/refresh
///
/// Authorities are re-resolved from the user's current roles; nothing is
/// carried over from the old token. Expiry is checked without skew.
pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RefreshTokenRequest>,
) -> Result<Json<RefreshTokenResponse>, ApiError> {
    let now = Utc::now();
    let (claims, expired) = match state.lifecycle.inspect_at(req.refresh_token.trim(), now) {
        DecodeOutcome::Valid(claims) => (claims, false),
        DecodeOutcome::Expired(claims) => (claims, true),
        DecodeOutcome::Malformed(reason) => {
            debug!(reason = %reason, "Refresh rejected: malformed token");
            return Err(AppError::authentication("Invalid refresh token")
                .with_code("INVALID_TOKEN")
                .into());
        }
    };

    if claims.token_type != TokenType::Refresh {
        warn!(username = %claims.sub, "Refresh rejected: not a refresh token");
        return Err(AppError::validation("Token is not a refresh token")
            .with_code("NOT_REFRESH_TOKEN")
            .into());
    }

    if expired || claims.exp <= now.timestamp() {
        debug!(username = %claims.sub, exp = claims.exp, "Refresh rejected: expired");
        return Err(AppError::authentication("Refresh token has expired")
            .with_code("EXPIRED_REFRESH_TOKEN")
            .into());
    }

    let principal = match state.gate.load_principal(&claims.sub).await {
        Ok(principal) => principal,
        Err(AuthError::AccountUnavailable(_) | AuthError::UnknownSubject(_)) => {
            warn!(username = %claims.sub, "Refresh rejected: account unusable");
            return Err(AppError::authentication("Invalid refresh token")
                .with_code("INVALID_TOKEN")
                .into());
        }
        Err(e) => return Err(e.into()),
    };

    let token = state.lifecycle.issue_access_token(&principal)?;
    info!(username = %principal.username, "Access token refreshed");

    Ok(Json(RefreshTokenResponse {
        token,
        token_type: BEARER.to_string(),
        expires_in: state.lifecycle.access_ttl_ms(),
    }))
}

/// GET /auth/validate
///
/// Valid only for an ACCESS token whose expiry is strictly in the future and
/// whose subject is still a usable account. Authorities come from the same
/// source the gate binds.
pub async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_from(&headers) else {
        return Err(AppError::validation("No token provided")
            .with_code("NO_TOKEN")
            .into());
    };

    let now = Utc::now();
    let claims = match state.lifecycle.inspect_at(token, now) {
        DecodeOutcome::Valid(claims) if claims.token_type == TokenType::Access => claims,
        _ => return Ok(invalid_token("Token is invalid or expired")),
    };

    if !state.lifecycle.validate_for_user_at(token, &claims.sub, now) {
        return Ok(invalid_token("Token is invalid or expired"));
    }

    let principal = match state.gate.load_principal(&claims.sub).await {
        Ok(principal) => principal,
        Err(AuthError::AccountUnavailable(_) | AuthError::UnknownSubject(_)) => {
            debug!(username = %claims.sub, "Validate: account unusable");
            return Ok(invalid_token("User account is not available"));
        }
        Err(e) => {
            warn!(username = %claims.sub, error = %e, "Validate: user lookup failed");
            return Ok(invalid_token("Token is invalid or expired"));
        }
    };

    let remaining = state.lifecycle.remaining_validity_at(token, now);
    let authorities = match state.config.auth.authority_source {
        AuthoritySource::Lookup => principal.authorities,
        AuthoritySource::Token => claims.authority_set(),
    };
    Ok(Json(TokenValidationResponse::valid(principal.username, remaining, authorities)).into_response())
}

fn invalid_token(message: &str) -> Response {
    let body = TokenValidationResponse::invalid(message);
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

/// POST /auth/logout
///
/// Tokens are stateless, so logout only records who left. Always succeeds.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<LogoutResponse> {
    match bearer_from(&headers).map(|t| state.lifecycle.extract_username_ignoring_expiration(t)) {
        Some(Ok(username)) => info!(username = %username, "User logged out"),
        Some(Err(e)) => debug!(error = %e, "Logout with unreadable token"),
        None => debug!("Logout without token"),
    }

    Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
        success: true,
    })
}

/// GET /auth/me
pub async fn me(auth: AuthUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse::from(&auth.0))
}
