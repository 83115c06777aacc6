//! Incident category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Security domain an incident or resource belongs to.
///
/// The category is also the axis of the defense-admin ACL: a defense-admin
/// has domain-wide access to physical records only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "incident_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IncidentCategory {
    /// Physical security (facilities, equipment, personnel).
    Physical,
    /// Cyber security (systems, networks, data).
    Cyber,
}

impl IncidentCategory {
    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Cyber => "cyber",
        }
    }
}

impl fmt::Display for IncidentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IncidentCategory {
    type Err = incidenthub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "physical" => Ok(Self::Physical),
            "cyber" => Ok(Self::Cyber),
            _ => Err(incidenthub_core::AppError::validation(format!(
                "Invalid incident category: '{s}'. Expected one of: physical, cyber"
            ))),
        }
    }
}
