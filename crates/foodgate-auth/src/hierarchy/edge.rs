//! A single role declaration in the hierarchy table.

use std::collections::BTreeSet;

use foodgate_core::config::RoleConfig;

/// Prefix distinguishing role authorities from privileges.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Normalizes a role name to its authority form (`ADMIN` → `ROLE_ADMIN`).
pub fn role_authority(role: &str) -> String {
    let role = role.trim();
    if role.starts_with(ROLE_PREFIX) {
        role.to_string()
    } else {
        format!("{ROLE_PREFIX}{role}")
    }
}

/// A role, the roles it inherits from, and the privileges it owns directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHierarchyEdge {
    /// Role authority name.
    pub parent_role: String,
    /// Inherited role authority names.
    pub inherits: Vec<String>,
    /// Directly owned privileges.
    pub privileges: BTreeSet<String>,
}

impl RoleHierarchyEdge {
    /// Declares a role with no privileges or parents.
    pub fn new(role: &str) -> Self {
        Self {
            parent_role: role_authority(role),
            inherits: Vec::new(),
            privileges: BTreeSet::new(),
        }
    }

    /// Adds inherited roles.
    pub fn inherits<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inherits
            .extend(roles.into_iter().map(|r| role_authority(r.as_ref())));
        self
    }

    /// Adds directly owned privileges.
    pub fn privileges<I, S>(mut self, privileges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.privileges.extend(privileges.into_iter().map(Into::into));
        self
    }
}

impl From<&RoleConfig> for RoleHierarchyEdge {
    fn from(config: &RoleConfig) -> Self {
        Self::new(&config.name)
            .inherits(&config.inherits)
            .privileges(config.privileges.iter().map(|p| p.trim().to_string()))
    }
}
