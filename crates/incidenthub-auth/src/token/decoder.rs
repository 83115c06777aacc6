//! Token verification against the ordered candidate secret list.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use serde::de::DeserializeOwned;
use tracing::debug;

use incidenthub_core::error::AppError;

use super::claims::{AccessClaims, RefreshClaims};
use super::keys::{SecretSource, TokenKeys};

/// Verifies access and refresh tokens.
///
/// Each token kind has an ordered list of candidate keys (primary, alias,
/// development fallback). Verification walks the list and succeeds on the
/// first match; the scan is linear so precedence stays deterministic.
#[derive(Clone)]
pub struct TokenDecoder {
    /// Access-token candidates, in precedence order.
    access: Vec<(SecretSource, DecodingKey)>,
    /// Refresh-token candidates, in precedence order.
    refresh: Vec<(SecretSource, DecodingKey)>,
    /// Shared validation settings.
    validation: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("access_candidates", &self.access.len())
            .field("refresh_candidates", &self.refresh.len())
            .finish()
    }
}

impl TokenDecoder {
    /// Creates a new decoder from the candidate keys.
    pub fn new(keys: &TokenKeys) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        let to_decoding =
            |candidates: &[super::keys::CandidateSecret]| -> Vec<(SecretSource, DecodingKey)> {
                candidates
                    .iter()
                    .map(|c| (c.source, DecodingKey::from_secret(c.secret.as_bytes())))
                    .collect()
            };

        Self {
            access: to_decoding(&keys.access),
            refresh: to_decoding(&keys.refresh),
            validation,
        }
    }

    /// Verifies an access token and returns its claims.
    ///
    /// Fails with `EXPIRED_ACCESS` when the token matched a candidate but is
    /// past its expiry, `INVALID_ACCESS` otherwise.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, AppError> {
        self.verify_candidates(token, &self.access)
    }

    /// Verifies a refresh token and returns its claims.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AppError> {
        self.verify_candidates(token, &self.refresh)
    }

    /// Walks the candidate list; first successful verification wins.
    ///
    /// An expired verdict is only produced by a candidate whose signature
    /// matched, so it outranks invalid-signature verdicts from the other
    /// candidates when reporting the failure.
    fn verify_candidates<C: DeserializeOwned>(
        &self,
        token: &str,
        candidates: &[(SecretSource, DecodingKey)],
    ) -> Result<C, AppError> {
        let mut expired = false;

        for (source, key) in candidates {
            match decode::<C>(token, key, &self.validation) {
                Ok(data) => return Ok(data.claims),
                Err(e) => {
                    debug!(source = ?source, error = %e, "Token candidate rejected");
                    if matches!(e.kind(), ErrorKind::ExpiredSignature) {
                        expired = true;
                    }
                }
            }
        }

        if expired {
            Err(AppError::expired_access())
        } else {
            Err(AppError::invalid_access())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::encoder::TokenEncoder;
    use crate::token::keys::CandidateSecret;
    use chrono::Duration;
    use incidenthub_core::error::AuthCode;
    use incidenthub_entity::user::{User, UserRole, UserStatus};

    fn keys_with(secrets: &[(&str, SecretSource)]) -> TokenKeys {
        let candidates: Vec<CandidateSecret> = secrets
            .iter()
            .map(|(s, source)| CandidateSecret {
                source: *source,
                secret: s.to_string(),
            })
            .collect();
        TokenKeys {
            access: candidates.clone(),
            refresh: candidates,
        }
    }

    fn test_user() -> User {
        let now = chrono::Utc::now();
        User {
            id: 7,
            username: "reporter".to_string(),
            fullname: "Test Reporter".to_string(),
            position: Some("Analyst".to_string()),
            role: UserRole::User,
            status: UserStatus::Active,
            password_hash: String::new(),
            password_changed_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    fn encoder_for(keys: &TokenKeys, ttl_seconds: i64) -> TokenEncoder {
        TokenEncoder::with_ttls(
            keys,
            Duration::seconds(ttl_seconds),
            Duration::seconds(ttl_seconds),
        )
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let keys = keys_with(&[("primary-secret", SecretSource::Primary)]);
        let encoder = encoder_for(&keys, 1800);
        let decoder = TokenDecoder::new(&keys);

        let (token, _) = encoder.sign_access(&test_user()).unwrap();
        let claims = decoder.verify_access(&token).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.username, "reporter");
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn test_verify_succeeds_with_non_primary_candidate() {
        // Token signed under the old secret; verifier has it as the third
        // candidate out of three.
        let old = keys_with(&[("old-secret", SecretSource::Primary)]);
        let encoder = encoder_for(&old, 1800);
        let (token, _) = encoder.sign_access(&test_user()).unwrap();

        let rotated = keys_with(&[
            ("new-secret", SecretSource::Primary),
            ("middle-secret", SecretSource::Alias),
            ("old-secret", SecretSource::DevFallback),
        ]);
        let decoder = TokenDecoder::new(&rotated);
        assert!(decoder.verify_access(&token).is_ok());
    }

    #[test]
    fn test_expired_token_reports_expired_not_invalid() {
        let keys = keys_with(&[
            ("primary-secret", SecretSource::Primary),
            ("other-secret", SecretSource::Alias),
        ]);
        let encoder = encoder_for(&keys, -60);
        let decoder = TokenDecoder::new(&keys);

        let (token, _) = encoder.sign_access(&test_user()).unwrap();
        let err = decoder.verify_access(&token).unwrap_err();
        assert_eq!(err.code, Some(AuthCode::ExpiredAccess));
    }

    #[test]
    fn test_foreign_secret_reports_invalid() {
        let foreign = keys_with(&[("somebody-else", SecretSource::Primary)]);
        let encoder = encoder_for(&foreign, 1800);
        let (token, _) = encoder.sign_access(&test_user()).unwrap();

        let keys = keys_with(&[
            ("primary-secret", SecretSource::Primary),
            ("alias-secret", SecretSource::Alias),
        ]);
        let decoder = TokenDecoder::new(&keys);
        let err = decoder.verify_access(&token).unwrap_err();
        assert_eq!(err.code, Some(AuthCode::InvalidAccess));
    }

    #[test]
    fn test_refresh_roundtrip() {
        let keys = keys_with(&[("refresh-secret", SecretSource::Primary)]);
        let encoder = encoder_for(&keys, 1800);
        let decoder = TokenDecoder::new(&keys);

        let (token, _) = encoder.sign_refresh(42).unwrap();
        let claims = decoder.verify_refresh(&token).unwrap();
        assert_eq!(claims.id, 42);
    }

    #[test]
    fn test_garbage_token_reports_invalid() {
        let keys = keys_with(&[("primary-secret", SecretSource::Primary)]);
        let decoder = TokenDecoder::new(&keys);
        let err = decoder.verify_access("not-a-token").unwrap_err();
        assert_eq!(err.code, Some(AuthCode::InvalidAccess));
    }
}
