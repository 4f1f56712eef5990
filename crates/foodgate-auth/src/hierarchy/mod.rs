//! Role hierarchy: declared edges, validation, and privilege closure.

pub mod defaults;
pub mod edge;
pub mod resolver;

pub use edge::{ROLE_PREFIX, RoleHierarchyEdge, role_authority};
pub use resolver::{HierarchyIndex, build_hierarchy};
