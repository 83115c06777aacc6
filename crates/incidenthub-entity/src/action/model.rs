//! Response action entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A response action taken against an incident.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Action {
    /// Unique action identifier.
    pub id: i64,
    /// The incident this action belongs to.
    pub incident_id: i64,
    /// What was done.
    pub description: String,
    /// The user who performed the action.
    pub taken_by: i64,
    /// When the action was performed.
    pub taken_at: DateTime<Utc>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAction {
    /// Parent incident.
    pub incident_id: i64,
    /// What was done.
    pub description: String,
    /// Acting user.
    pub taken_by: i64,
    /// When the action was performed.
    pub taken_at: DateTime<Utc>,
}

/// Data for updating an existing action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAction {
    /// The action ID to update.
    pub id: i64,
    /// New description.
    pub description: Option<String>,
    /// New performed-at timestamp.
    pub taken_at: Option<DateTime<Utc>>,
}
