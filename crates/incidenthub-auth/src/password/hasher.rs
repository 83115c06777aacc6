//! Bcrypt password hashing and verification.

use std::borrow::Cow;

use incidenthub_core::config::auth::AuthConfig;
use incidenthub_core::error::AppError;

/// Canonical bcrypt prefix produced by current hashing.
const CANONICAL_PREFIX: &str = "$2b$";
/// Legacy prefixes found in credential records hashed by older libraries.
const LEGACY_PREFIXES: [&str; 2] = ["$2y$", "$2a$"];

/// Handles password hashing and verification using bcrypt.
///
/// Stored hashes may carry one of two legacy prefix variants produced by
/// older hashing libraries; they are algorithmically identical to the
/// canonical variant and are normalized before comparison so no credential
/// migration is needed.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Bcrypt cost factor.
    cost: u32,
}

impl PasswordHasher {
    /// Creates a new password hasher from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            cost: config.bcrypt_cost,
        }
    }

    /// Creates a hasher with an explicit cost factor.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password with the configured cost.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Verifies a plaintext password against a stored bcrypt hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    /// Errors only on a malformed stored hash.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, AppError> {
        let normalized = normalize_legacy_prefix(stored_hash);
        bcrypt::verify(password, &normalized)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))
    }
}

/// Rewrites a legacy bcrypt prefix to the canonical variant.
fn normalize_legacy_prefix(hash: &str) -> Cow<'_, str> {
    for legacy in LEGACY_PREFIXES {
        if let Some(rest) = hash.strip_prefix(legacy) {
            return Cow::Owned(format!("{CANONICAL_PREFIX}{rest}"));
        }
    }
    Cow::Borrowed(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the hashing rounds fast under test.
    fn hasher() -> PasswordHasher {
        PasswordHasher::with_cost(4)
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hasher = hasher();
        let hash = hasher.hash("Correct-Horse-7").unwrap();
        assert!(hash.starts_with(CANONICAL_PREFIX));
        assert!(hasher.verify("Correct-Horse-7", &hash).unwrap());
        assert!(!hasher.verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_legacy_prefixes_verify_identically() {
        let hasher = hasher();
        let hash = hasher.hash("Correct-Horse-7").unwrap();
        let tail = &hash[4..];

        for legacy in LEGACY_PREFIXES {
            let legacy_hash = format!("{legacy}{tail}");
            assert!(
                hasher.verify("Correct-Horse-7", &legacy_hash).unwrap(),
                "hash with prefix {legacy} should verify"
            );
            assert!(!hasher.verify("wrong-password", &legacy_hash).unwrap());
        }
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = hasher();
        assert!(hasher.verify("whatever", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn test_normalize_leaves_canonical_untouched() {
        assert!(matches!(
            normalize_legacy_prefix("$2b$10$abcdef"),
            Cow::Borrowed(_)
        ));
        assert_eq!(normalize_legacy_prefix("$2y$10$abcdef"), "$2b$10$abcdef");
        assert_eq!(normalize_legacy_prefix("$2a$10$abcdef"), "$2b$10$abcdef");
    }
}
