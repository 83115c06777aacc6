//! # incidenthub-auth
//!
//! Authentication and authorization core for IncidentHub.
//!
//! ## Modules
//!
//! - `token` — signed token issuance and multi-secret verification
//! - `password` — bcrypt credential hashing and password policy
//! - `acl` — per-resource ownership/role predicates
//! - `store` — the identity-store trait the middleware hydrates through

pub mod acl;
pub mod password;
pub mod store;
pub mod token;

pub use acl::ResourceOwnership;
pub use password::{PasswordHasher, PasswordPolicy};
pub use store::IdentityStore;
pub use token::{AccessClaims, RefreshClaims, TokenDecoder, TokenEncoder, TokenKeys};
