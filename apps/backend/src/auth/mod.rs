//! Authentication and authorization core.

pub mod claims;
pub mod error;
pub mod federation;
pub mod google;
pub mod identity;
pub mod jwt;
pub mod ownership;

pub use claims::{Claims, IdentityProfile};
pub use error::AuthError;
pub use federation::{federate, ExternalClaims, IdTokenVerifier};
pub use google::GoogleIdTokenVerifier;
pub use identity::{resolve_caller, Caller};
pub use jwt::{mint_access_token, verify_access_token};
pub use ownership::{authorize, ensure_owner, Owned};
