//! Token wire format, claims, and lifecycle.

pub mod claims;
pub mod codec;
pub mod key;
pub mod lifecycle;

pub use claims::{Claims, TokenType};
pub use codec::{DecodeOutcome, TokenCodec};
pub use key::SigningKey;
pub use lifecycle::{TokenLifecycleManager, TokenState};
