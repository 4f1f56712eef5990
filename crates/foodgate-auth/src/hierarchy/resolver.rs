//! Privilege closure over the role hierarchy.

use std::collections::{BTreeSet, HashMap};

use foodgate_core::config::HierarchyConfig;

use crate::error::AuthError;

use super::defaults::shipped_hierarchy;
use super::edge::{RoleHierarchyEdge, role_authority};

/// Precomputed privilege closure for every declared role.
///
/// Built once at startup and read concurrently afterwards.
#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    closures: HashMap<String, BTreeSet<String>>,
}

/// Validates the edges and computes each role's closure.
///
/// Fails with [`AuthError::Configuration`] on duplicate roles, inheritance
/// from an undeclared role, or any inheritance cycle.
pub fn build_hierarchy(edges: Vec<RoleHierarchyEdge>) -> Result<HierarchyIndex, AuthError> {
    let mut declared: HashMap<String, RoleHierarchyEdge> = HashMap::with_capacity(edges.len());
    for edge in edges {
        let name = role_authority(&edge.parent_role);
        if declared.contains_key(&name) {
            return Err(AuthError::Configuration(format!(
                "role '{name}' is declared more than once"
            )));
        }
        declared.insert(name, edge);
    }

    for (name, edge) in &declared {
        if let Some(missing) = edge
            .inherits
            .iter()
            .map(|r| role_authority(r))
            .find(|r| !declared.contains_key(r))
        {
            return Err(AuthError::Configuration(format!(
                "role '{name}' inherits undeclared role '{missing}'"
            )));
        }
    }

    let mut names: Vec<&String> = declared.keys().collect();
    names.sort();

    let mut closures = HashMap::with_capacity(declared.len());
    let mut path = Vec::new();
    for name in names {
        closure_of(name, &declared, &mut closures, &mut path)?;
    }

    Ok(HierarchyIndex { closures })
}

/// Depth-first closure; `path` holds the roles currently being expanded.
fn closure_of(
    name: &str,
    declared: &HashMap<String, RoleHierarchyEdge>,
    closures: &mut HashMap<String, BTreeSet<String>>,
    path: &mut Vec<String>,
) -> Result<BTreeSet<String>, AuthError> {
    if let Some(done) = closures.get(name) {
        return Ok(done.clone());
    }
    if path.iter().any(|role| role == name) {
        path.push(name.to_string());
        return Err(AuthError::Configuration(format!(
            "role hierarchy contains a cycle: {}",
            path.join(" -> ")
        )));
    }

    let edge = declared
        .get(name)
        .ok_or_else(|| AuthError::Configuration(format!("role '{name}' is not declared")))?;

    path.push(name.to_string());
    let mut closure = edge.privileges.clone();
    for inherited in &edge.inherits {
        let inherited = role_authority(inherited);
        let inherited_closure = closure_of(&inherited, declared, closures, path)?;
        closure.insert(inherited);
        closure.extend(inherited_closure);
    }
    path.pop();

    closures.insert(name.to_string(), closure.clone());
    Ok(closure)
}

impl HierarchyIndex {
    /// Builds the index from configuration, falling back to the shipped table.
    pub fn from_config(config: &HierarchyConfig) -> Result<Self, AuthError> {
        if config.roles.is_empty() {
            return build_hierarchy(shipped_hierarchy());
        }
        build_hierarchy(config.roles.iter().map(RoleHierarchyEdge::from).collect())
    }

    /// The shipped hierarchy.
    pub fn shipped() -> Result<Self, AuthError> {
        build_hierarchy(shipped_hierarchy())
    }

    /// Closure of a declared role, excluding the role's own authority.
    pub fn closure(&self, role: &str) -> Option<&BTreeSet<String>> {
        self.closures.get(&role_authority(role))
    }

    /// Number of declared roles.
    pub fn len(&self) -> usize {
        self.closures.len()
    }

    /// Whether no roles are declared.
    pub fn is_empty(&self) -> bool {
        self.closures.is_empty()
    }

    /// Authorities granted by `roles`: each role's authority plus its closure.
    ///
    /// Unknown roles contribute only their own authority.
    pub fn resolve_authorities<I, S>(&self, roles: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut authorities = BTreeSet::new();
        for role in roles {
            let role = role_authority(role.as_ref());
            if let Some(closure) = self.closures.get(&role) {
                authorities.extend(closure.iter().cloned());
            }
            authorities.insert(role);
        }
        authorities
    }
}
