//! Read-only privilege queries against the principal bound to a request.

use std::collections::BTreeSet;

use crate::principal::Principal;

/// Answers privilege questions for one request.
///
/// Borrowing the principal keeps the checker scoped to the request that
/// owns it. With no principal bound every query is `false` or empty.
#[derive(Debug, Clone, Copy)]
pub struct PrivilegeChecker<'a> {
    principal: Option<&'a Principal>,
}

impl<'a> PrivilegeChecker<'a> {
    /// Creates a checker over an optional principal.
    pub fn new(principal: Option<&'a Principal>) -> Self {
        Self { principal }
    }

    /// A checker with no principal bound.
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    /// Whether a principal is bound.
    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    /// Whether the principal holds `privilege`.
    pub fn has(&self, privilege: &str) -> bool {
        self.principal.is_some_and(|p| p.has_authority(privilege))
    }

    /// Whether the principal holds at least one of `privileges`.
    pub fn has_any(&self, privileges: &[&str]) -> bool {
        self.principal
            .is_some_and(|p| privileges.iter().any(|privilege| p.has_authority(privilege)))
    }

    /// Whether the principal holds every one of `privileges`.
    pub fn has_all(&self, privileges: &[&str]) -> bool {
        self.principal
            .is_some_and(|p| privileges.iter().all(|privilege| p.has_authority(privilege)))
    }

    /// The principal's full authority set.
    pub fn current_privileges(&self) -> BTreeSet<String> {
        self.principal
            .map(|p| p.authorities.clone())
            .unwrap_or_default()
    }

    /// Username of the bound principal.
    pub fn current_username(&self) -> Option<&'a str> {
        self.principal.map(|p| p.username.as_str())
    }
}
