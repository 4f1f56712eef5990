//! Route-level guards over the request's principal.
//!
//! Handlers call these with the principal taken from
//! [`CurrentPrincipal`](crate::extractors::CurrentPrincipal). A missing
//! principal yields 401, a missing privilege 403.

use foodgate_auth::{Principal, PrivilegeChecker};
use foodgate_core::AppError;

/// Requires an authenticated principal.
pub fn require_authenticated(principal: Option<&Principal>) -> Result<&Principal, AppError> {
    principal.ok_or_else(|| AppError::authentication("Authentication required"))
}

/// Requires `privilege`.
pub fn require_privilege(principal: Option<&Principal>, privilege: &str) -> Result<(), AppError> {
    let principal = require_authenticated(principal)?;
    if PrivilegeChecker::new(Some(principal)).has(privilege) {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "Privilege '{privilege}' required"
        )))
    }
}

/// Requires at least one of `privileges`.
pub fn require_any_privilege(
    principal: Option<&Principal>,
    privileges: &[&str],
) -> Result<(), AppError> {
    let principal = require_authenticated(principal)?;
    if PrivilegeChecker::new(Some(principal)).has_any(privileges) {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "One of [{}] required",
            privileges.join(", ")
        )))
    }
}

/// Requires every one of `privileges`.
pub fn require_all_privileges(
    principal: Option<&Principal>,
    privileges: &[&str],
) -> Result<(), AppError> {
    let principal = require_authenticated(principal)?;
    if PrivilegeChecker::new(Some(principal)).has_all(privileges) {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "All of [{}] required",
            privileges.join(", ")
        )))
    }
}
