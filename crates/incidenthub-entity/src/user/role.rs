//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the access control system.
///
/// Exactly three roles exist. Any other value found in a token or a request
/// is not a role at all; role-gated routes treat it as unauthenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    /// Regular reporter; sees only their own records.
    User,
    /// Administrator for the physical-security domain.
    DefenseAdmin,
    /// Full system administrator; passes every role gate.
    SystemAdmin,
}

impl UserRole {
    /// Check if this role is the system administrator.
    pub fn is_system_admin(&self) -> bool {
        matches!(self, Self::SystemAdmin)
    }

    /// Return the role as its kebab-case wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::DefenseAdmin => "defense-admin",
            Self::SystemAdmin => "system-admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = incidenthub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "defense-admin" => Ok(Self::DefenseAdmin),
            "system-admin" => Ok(Self::SystemAdmin),
            _ => Err(incidenthub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: user, defense-admin, system-admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("user".parse::<UserRole>().unwrap(), UserRole::User);
        assert_eq!(
            "Defense-Admin".parse::<UserRole>().unwrap(),
            UserRole::DefenseAdmin
        );
        assert_eq!(
            "SYSTEM-ADMIN".parse::<UserRole>().unwrap(),
            UserRole::SystemAdmin
        );
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_wire_strings() {
        assert_eq!(UserRole::DefenseAdmin.as_str(), "defense-admin");
        assert_eq!(UserRole::SystemAdmin.to_string(), "system-admin");
    }
}
