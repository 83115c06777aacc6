//! Token issuance and verification.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod keys;

pub use claims::{AccessClaims, RefreshClaims};
pub use decoder::TokenDecoder;
pub use encoder::TokenEncoder;
pub use keys::{CandidateSecret, SecretSource, TokenKeys};
