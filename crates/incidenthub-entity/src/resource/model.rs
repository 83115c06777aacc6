//! Protected resource entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::incident::IncidentCategory;

/// A protected asset tracked by the system (facility, system, equipment).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: i64,
    /// Resource name.
    pub name: String,
    /// Security domain the resource belongs to.
    pub category: IncidentCategory,
    /// Free-text description.
    pub description: Option<String>,
    /// The user responsible for this resource; the ownership anchor for ACL.
    pub owner_id: i64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResource {
    /// Resource name.
    pub name: String,
    /// Security domain.
    pub category: IncidentCategory,
    /// Description (optional).
    pub description: Option<String>,
    /// Responsible user.
    pub owner_id: i64,
}

/// Data for updating an existing resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResource {
    /// The resource ID to update.
    pub id: i64,
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New responsible user.
    pub owner_id: Option<i64>,
}
