//! Authentication and credential configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authentication and credential configuration.
///
/// The alias secret fields exist for rotation: a deployment can rename its
/// secret variable and keep the previous value as the alias so that tokens
/// issued under the old name still verify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Primary secret for signing and verifying access tokens.
    #[serde(default)]
    pub access_secret: String,
    /// Previous access secret kept valid for verification only.
    #[serde(default)]
    pub access_secret_alias: Option<String>,
    /// Primary secret for signing and verifying refresh tokens.
    #[serde(default)]
    pub refresh_secret: String,
    /// Previous refresh secret kept valid for verification only.
    #[serde(default)]
    pub refresh_secret_alias: Option<String>,
    /// Access token lifetime as a duration string ("30m", "2h", ...).
    #[serde(default = "default_token_ttl")]
    pub access_token_ttl: String,
    /// Refresh token lifetime as a duration string.
    #[serde(default = "default_token_ttl")]
    pub refresh_token_ttl: String,
    /// Password maximum age in days; 0 or negative disables expiry.
    #[serde(default = "default_password_max_age")]
    pub password_max_age_days: i64,
    /// Bcrypt cost factor for password hashing.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Parse the configured access token TTL.
    pub fn access_ttl(&self) -> Result<Duration, AppError> {
        parse_ttl("auth.access_token_ttl", &self.access_token_ttl)
    }

    /// Parse the configured refresh token TTL.
    pub fn refresh_ttl(&self) -> Result<Duration, AppError> {
        parse_ttl("auth.refresh_token_ttl", &self.refresh_token_ttl)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: String::new(),
            access_secret_alias: None,
            refresh_secret: String::new(),
            refresh_secret_alias: None,
            access_token_ttl: default_token_ttl(),
            refresh_token_ttl: default_token_ttl(),
            password_max_age_days: default_password_max_age(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

/// Parse a human-readable duration string ("30m") into a chrono duration.
fn parse_ttl(field: &str, value: &str) -> Result<Duration, AppError> {
    let parsed = humantime::parse_duration(value).map_err(|e| {
        AppError::configuration(format!("Invalid duration in {field} ('{value}'): {e}"))
    })?;
    Duration::from_std(parsed)
        .map_err(|_| AppError::configuration(format!("Duration out of range in {field}")))
}

fn default_token_ttl() -> String {
    "30m".to_string()
}

fn default_password_max_age() -> i64 {
    90
}

fn default_bcrypt_cost() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_parses() {
        let config = AuthConfig::default();
        assert_eq!(config.access_ttl().unwrap(), Duration::minutes(30));
        assert_eq!(config.refresh_ttl().unwrap(), Duration::minutes(30));
    }

    #[test]
    fn test_bad_ttl_is_configuration_error() {
        let config = AuthConfig {
            access_token_ttl: "half an hour".to_string(),
            ..AuthConfig::default()
        };
        let err = config.access_ttl().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
