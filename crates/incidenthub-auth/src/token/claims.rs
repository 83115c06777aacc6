//! Token claims structures.

use serde::{Deserialize, Serialize};

use incidenthub_entity::user::User;

/// Claims payload embedded in every access token.
///
/// The role is carried as a plain string rather than the [`UserRole`] enum:
/// a token minted with a role this build no longer knows must still decode,
/// and the role gate is where an unknown role gets rejected.
///
/// [`UserRole`]: incidenthub_entity::user::UserRole
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject — the numeric user ID.
    pub id: i64,
    /// Username at issuance time.
    pub username: String,
    /// Full name at issuance time.
    pub fullname: String,
    /// Role wire string at issuance time.
    pub role: String,
    /// Organizational position (optional).
    pub position: Option<String>,
    /// Account status wire string at issuance time.
    pub status: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl AccessClaims {
    /// Build the claims payload for a user, without timestamps.
    pub fn for_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            fullname: user.fullname.clone(),
            role: user.role.to_string(),
            position: user.position.clone(),
            status: user.status.to_string(),
            iat: 0,
            exp: 0,
        }
    }
}

/// Claims payload embedded in every refresh token.
///
/// Carries only an identity reference; everything else is re-read from the
/// identity store when a new access token is minted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject — the numeric user ID.
    pub id: i64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}
