//! # foodgate-auth
//!
//! Stateless bearer-token authentication and role-hierarchy authorization
//! for the Foodgate service.
//!
//! ## Modules
//!
//! - `jwt`: token wire codec, claims, and issuance/classification lifecycle
//! - `hierarchy`: role hierarchy validation and privilege closure
//! - `gate`: per-request authentication producing an [`AuthenticationOutcome`]
//! - `checker`: read-only privilege queries against a bound [`Principal`]
//! - `directory`: user lookup and credential verification collaborators
//! - `password`: Argon2id password hashing

pub mod checker;
pub mod directory;
pub mod error;
pub mod gate;
pub mod hierarchy;
pub mod jwt;
pub mod password;
pub mod principal;

pub use checker::PrivilegeChecker;
pub use directory::{
    CredentialVerifier, InMemoryUserDirectory, PasswordCredentialVerifier, UserLookup, UserRecord,
};
pub use error::AuthError;
pub use gate::{AuthenticationGate, PublicPathMatcher};
pub use hierarchy::{HierarchyIndex, RoleHierarchyEdge};
pub use jwt::{Claims, DecodeOutcome, SigningKey, TokenCodec, TokenLifecycleManager, TokenState, TokenType};
pub use password::PasswordHasher;
pub use principal::{AccountFlags, AuthenticationOutcome, Principal, UnauthenticatedReason};
