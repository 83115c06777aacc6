//! Token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use incidenthub_core::config::auth::AuthConfig;
use incidenthub_core::error::AppError;
use incidenthub_entity::user::User;

use super::claims::{AccessClaims, RefreshClaims};
use super::keys::TokenKeys;

/// Creates signed access and refresh tokens.
///
/// Signing always uses the primary configured secret; aliases and the
/// development fallback exist only on the verification side.
#[derive(Clone)]
pub struct TokenEncoder {
    /// HMAC key for signing access tokens.
    access_key: EncodingKey,
    /// HMAC key for signing refresh tokens.
    refresh_key: EncodingKey,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl TokenEncoder {
    /// Creates a new encoder from the candidate keys and auth configuration.
    pub fn new(keys: &TokenKeys, config: &AuthConfig) -> Result<Self, AppError> {
        Ok(Self {
            access_key: EncodingKey::from_secret(keys.access_signing_secret().as_bytes()),
            refresh_key: EncodingKey::from_secret(keys.refresh_signing_secret().as_bytes()),
            access_ttl: config.access_ttl()?,
            refresh_ttl: config.refresh_ttl()?,
        })
    }

    /// Creates an encoder with explicit TTLs, bypassing config parsing.
    pub fn with_ttls(keys: &TokenKeys, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            access_key: EncodingKey::from_secret(keys.access_signing_secret().as_bytes()),
            refresh_key: EncodingKey::from_secret(keys.refresh_signing_secret().as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Signs a new access token for the given user.
    ///
    /// Returns the token string and its expiry instant.
    pub fn sign_access(&self, user: &User) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let expires_at = now + self.access_ttl;

        let mut claims = AccessClaims::for_user(user);
        claims.iat = now.timestamp();
        claims.exp = expires_at.timestamp();

        let token = encode(&Header::default(), &claims, &self.access_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, expires_at))
    }

    /// Signs a new refresh token referencing the given user ID.
    pub fn sign_refresh(&self, user_id: i64) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let expires_at = now + self.refresh_ttl;

        let claims = RefreshClaims {
            id: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.refresh_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        Ok((token, expires_at))
    }
}
