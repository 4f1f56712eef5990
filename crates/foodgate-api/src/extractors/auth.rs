//! Principal extractors reading what the gate middleware bound to the request.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use foodgate_auth::{Principal, PrivilegeChecker};
use foodgate_core::AppError;

use crate::error::ApiError;

/// The authenticated principal. Rejects anonymous requests with 401 `NO_AUTH`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    /// Privilege queries for this request.
    pub fn checker(&self) -> PrivilegeChecker<'_> {
        PrivilegeChecker::new(Some(&self.0))
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                AppError::authentication("No authenticated user")
                    .with_code("NO_AUTH")
                    .into()
            })
    }
}

/// The principal if one is bound. Never rejects.
#[derive(Debug, Clone, Default)]
pub struct CurrentPrincipal(pub Option<Principal>);

impl CurrentPrincipal {
    /// Privilege queries for this request; all `false` when anonymous.
    pub fn checker(&self) -> PrivilegeChecker<'_> {
        PrivilegeChecker::new(self.0.as_ref())
    }

    /// The bound principal.
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Principal>().cloned()))
    }
}
