//! Role hierarchy configuration.

use serde::{Deserialize, Serialize};

/// The role table. Left empty, the shipped hierarchy is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Declared roles.
    #[serde(default)]
    pub roles: Vec<RoleConfig>,
}

/// One role declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Role name, with or without the `ROLE_` prefix.
    pub name: String,
    /// Roles whose privileges this role inherits.
    #[serde(default)]
    pub inherits: Vec<String>,
    /// Privileges owned directly by this role.
    #[serde(default)]
    pub privileges: Vec<String>,
}
