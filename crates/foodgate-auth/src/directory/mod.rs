//! External collaborators consumed by authentication: user lookup and
//! credential verification, plus the in-memory implementations used by
//! the server binary and the tests.

pub mod lookup;
pub mod memory;
pub mod verifier;

pub use lookup::{UserLookup, UserRecord};
pub use memory::InMemoryUserDirectory;
pub use verifier::{CredentialVerifier, PasswordCredentialVerifier};
