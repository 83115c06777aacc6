//! Incident entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::category::IncidentCategory;
use super::severity::IncidentSeverity;
use super::status::IncidentStatus;

/// A reported security incident.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Incident {
    /// Unique incident identifier.
    pub id: i64,
    /// Short summary title.
    pub title: String,
    /// Full narrative description.
    pub description: String,
    /// Security domain of the incident.
    pub category: IncidentCategory,
    /// Severity grading.
    pub severity: IncidentSeverity,
    /// Workflow status.
    pub status: IncidentStatus,
    /// Where the incident occurred (optional free text).
    pub location: Option<String>,
    /// The user who reported the incident; the ownership anchor for ACL.
    pub reported_by: i64,
    /// When the incident actually occurred.
    pub occurred_at: DateTime<Utc>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new incident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIncident {
    /// Short summary title.
    pub title: String,
    /// Full narrative description.
    pub description: String,
    /// Security domain.
    pub category: IncidentCategory,
    /// Severity grading.
    pub severity: IncidentSeverity,
    /// Location (optional).
    pub location: Option<String>,
    /// Reporting user.
    pub reported_by: i64,
    /// When the incident occurred.
    pub occurred_at: DateTime<Utc>,
}

/// Data for updating an existing incident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateIncident {
    /// The incident ID to update.
    pub id: i64,
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New severity.
    pub severity: Option<IncidentSeverity>,
    /// New workflow status.
    pub status: Option<IncidentStatus>,
    /// New location.
    pub location: Option<String>,
}
