//! Password age and complexity policy.

use chrono::{DateTime, Utc};

use incidenthub_core::config::auth::AuthConfig;
use incidenthub_entity::user::{User, UserRole};

/// Evaluates password age and complexity rules.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Maximum password age in days; 0 or negative disables expiry.
    max_age_days: i64,
}

impl PasswordPolicy {
    /// Creates a new policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            max_age_days: config.password_max_age_days,
        }
    }

    /// Creates a policy with an explicit maximum age.
    pub fn with_max_age_days(max_age_days: i64) -> Self {
        Self { max_age_days }
    }

    /// Whether a password last changed at the given instant has expired.
    ///
    /// A missing timestamp counts as expired: a credential record whose age
    /// cannot be established forces a reset rather than silently passing.
    pub fn is_expired(&self, password_changed_at: Option<DateTime<Utc>>) -> bool {
        if self.max_age_days <= 0 {
            return false;
        }
        let Some(changed_at) = password_changed_at else {
            return true;
        };
        (Utc::now() - changed_at).num_days() > self.max_age_days
    }

    /// Whether the given user's password has expired.
    ///
    /// System administrators are exempt regardless of age, so an expired
    /// admin credential can never lock the system out of itself.
    pub fn is_expired_for(&self, user: &User) -> bool {
        if user.role == UserRole::SystemAdmin {
            return false;
        }
        self.is_expired(user.password_changed_at)
    }
}

/// Whether a candidate password meets the complexity rules.
///
/// Requires, jointly: length of at least 8 characters, an uppercase Latin or
/// Cyrillic letter, a lowercase Latin or Cyrillic letter, a digit, and a
/// symbol (any character outside ASCII alphanumerics and Cyrillic letters).
pub fn meets_complexity(candidate: &str) -> bool {
    let long_enough = candidate.chars().count() >= 8;
    let has_upper = candidate
        .chars()
        .any(|c| c.is_ascii_uppercase() || is_cyrillic(c));
    let has_lower = candidate
        .chars()
        .any(|c| c.is_ascii_lowercase() || (is_cyrillic(c) && c.is_lowercase()));
    let has_digit = candidate.chars().any(|c| c.is_ascii_digit());
    let has_symbol = candidate
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && !is_cyrillic(c));

    long_enough && has_upper && has_lower && has_digit && has_symbol
}

/// Whether a character belongs to the Cyrillic block.
fn is_cyrillic(c: char) -> bool {
    ('\u{0400}'..='\u{04FF}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use incidenthub_entity::user::UserStatus;

    fn user_with(role: UserRole, changed_days_ago: Option<i64>) -> User {
        let now = Utc::now();
        User {
            id: 1,
            username: "u".to_string(),
            fullname: "U".to_string(),
            position: None,
            role,
            status: UserStatus::Active,
            password_hash: String::new(),
            password_changed_at: changed_days_ago.map(|d| now - Duration::days(d)),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_zero_max_age_disables_expiry() {
        let policy = PasswordPolicy::with_max_age_days(0);
        assert!(!policy.is_expired(None));
        assert!(!policy.is_expired(Some(Utc::now() - Duration::days(10_000))));
    }

    #[test]
    fn test_missing_timestamp_is_expired() {
        let policy = PasswordPolicy::with_max_age_days(90);
        assert!(policy.is_expired(None));
    }

    #[test]
    fn test_whole_day_boundary() {
        let policy = PasswordPolicy::with_max_age_days(90);
        assert!(!policy.is_expired(Some(Utc::now() - Duration::days(90))));
        assert!(policy.is_expired(Some(Utc::now() - Duration::days(91))));
    }

    #[test]
    fn test_system_admin_is_exempt() {
        let policy = PasswordPolicy::with_max_age_days(90);
        assert!(policy.is_expired_for(&user_with(UserRole::User, Some(400))));
        assert!(!policy.is_expired_for(&user_with(UserRole::SystemAdmin, Some(400))));
        assert!(!policy.is_expired_for(&user_with(UserRole::SystemAdmin, None)));
    }

    #[test]
    fn test_complexity_rejects_short_and_simple() {
        assert!(!meets_complexity("abc"));
        assert!(!meets_complexity("abcdefgh"));
        assert!(!meets_complexity("Abcdefg1"));
        assert!(!meets_complexity("ABCDEF12!"));
    }

    #[test]
    fn test_complexity_accepts_full_conjunction() {
        assert!(meets_complexity("Abc12345!"));
    }

    #[test]
    fn test_complexity_accepts_cyrillic_letters() {
        // Cyrillic letters satisfy the letter clauses; the symbol must still
        // come from outside the supported scripts.
        assert!(meets_complexity("Пароль12!"));
        assert!(!meets_complexity("Пароль123"));
    }
}
