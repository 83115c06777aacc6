//! Candidate secret sets for token signing and verification.
//!
//! Verification accepts tokens signed under any configured secret so that a
//! deployment can rotate or rename its secret variable without invalidating
//! tokens already in flight. Candidates are held in a plain ordered list;
//! precedence is fixed by construction order.

use incidenthub_core::config::auth::AuthConfig;
use incidenthub_core::error::AppError;

/// Development fallback secret for access tokens.
pub const DEV_ACCESS_SECRET: &str = "incidenthub-dev-access-secret";
/// Development fallback secret for refresh tokens.
pub const DEV_REFRESH_SECRET: &str = "incidenthub-dev-refresh-secret";

/// Where a candidate secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    /// The currently configured secret; the only one used for signing.
    Primary,
    /// A previous secret kept valid for verification only.
    Alias,
    /// The built-in development fallback.
    DevFallback,
}

/// One verification candidate.
#[derive(Clone)]
pub struct CandidateSecret {
    /// Provenance tag, used in logs and the production guard.
    pub source: SecretSource,
    /// Raw secret bytes.
    pub secret: String,
}

impl std::fmt::Debug for CandidateSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateSecret")
            .field("source", &self.source)
            .finish()
    }
}

/// The full secret configuration for both token kinds.
#[derive(Debug, Clone)]
pub struct TokenKeys {
    /// Ordered access-token verification candidates.
    pub access: Vec<CandidateSecret>,
    /// Ordered refresh-token verification candidates.
    pub refresh: Vec<CandidateSecret>,
}

impl TokenKeys {
    /// Build the candidate lists from configuration.
    ///
    /// Order is primary, then alias (if configured), then the development
    /// fallback. An unset primary falls back to the development secret so a
    /// bare checkout still runs; production deployments are rejected by
    /// [`TokenKeys::ensure_production_safe`].
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            access: build_candidates(
                &config.access_secret,
                config.access_secret_alias.as_deref(),
                DEV_ACCESS_SECRET,
            ),
            refresh: build_candidates(
                &config.refresh_secret,
                config.refresh_secret_alias.as_deref(),
                DEV_REFRESH_SECRET,
            ),
        }
    }

    /// The secret used for signing access tokens (highest-precedence candidate).
    pub fn access_signing_secret(&self) -> &str {
        &self.access[0].secret
    }

    /// The secret used for signing refresh tokens.
    pub fn refresh_signing_secret(&self) -> &str {
        &self.refresh[0].secret
    }

    /// Fail-fast guard against deploying with a guessable secret.
    ///
    /// In production mode, a primary or alias candidate equal to one of the
    /// development placeholders aborts startup. Never downgraded to a
    /// warning.
    pub fn ensure_production_safe(&self, production: bool) -> Result<(), AppError> {
        if !production {
            return Ok(());
        }
        for candidate in self.access.iter().chain(self.refresh.iter()) {
            if candidate.source == SecretSource::DevFallback {
                continue;
            }
            if candidate.secret == DEV_ACCESS_SECRET || candidate.secret == DEV_REFRESH_SECRET {
                return Err(AppError::configuration(
                    "Refusing to start in production with a development token secret",
                ));
            }
        }
        if self.access[0].source != SecretSource::Primary
            || self.refresh[0].source != SecretSource::Primary
        {
            return Err(AppError::configuration(
                "Refusing to start in production without configured token secrets",
            ));
        }
        Ok(())
    }
}

fn build_candidates(primary: &str, alias: Option<&str>, dev: &str) -> Vec<CandidateSecret> {
    let mut candidates = Vec::new();
    if !primary.is_empty() {
        candidates.push(CandidateSecret {
            source: SecretSource::Primary,
            secret: primary.to_string(),
        });
    }
    if let Some(alias) = alias {
        if !alias.is_empty() {
            candidates.push(CandidateSecret {
                source: SecretSource::Alias,
                secret: alias.to_string(),
            });
        }
    }
    candidates.push(CandidateSecret {
        source: SecretSource::DevFallback,
        secret: dev.to_string(),
    });
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(access: &str, alias: Option<&str>) -> AuthConfig {
        AuthConfig {
            access_secret: access.to_string(),
            access_secret_alias: alias.map(String::from),
            refresh_secret: "refresh-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_candidate_order_is_primary_alias_dev() {
        let keys = TokenKeys::from_config(&config("current", Some("previous")));
        let sources: Vec<_> = keys.access.iter().map(|c| c.source).collect();
        assert_eq!(
            sources,
            vec![
                SecretSource::Primary,
                SecretSource::Alias,
                SecretSource::DevFallback
            ]
        );
        assert_eq!(keys.access_signing_secret(), "current");
    }

    #[test]
    fn test_unset_primary_falls_back_to_dev() {
        let keys = TokenKeys::from_config(&config("", None));
        assert_eq!(keys.access[0].source, SecretSource::DevFallback);
    }

    #[test]
    fn test_production_guard_rejects_dev_fallback_primary() {
        let keys = TokenKeys::from_config(&config("", None));
        assert!(keys.ensure_production_safe(true).is_err());
        assert!(keys.ensure_production_safe(false).is_ok());
    }

    #[test]
    fn test_production_guard_rejects_placeholder_value() {
        let keys = TokenKeys::from_config(&config(DEV_ACCESS_SECRET, None));
        assert!(keys.ensure_production_safe(true).is_err());
    }

    #[test]
    fn test_production_guard_accepts_real_secrets() {
        let keys = TokenKeys::from_config(&config("a-long-random-value", Some("previous")));
        assert!(keys.ensure_production_safe(true).is_ok());
    }
}
