//! System setting entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A key/value system configuration entry, editable by system admins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SettingEntry {
    /// Setting key.
    pub key: String,
    /// Setting value (stored as text).
    pub value: String,
    /// The admin who last changed this entry.
    pub updated_by: i64,
    /// When the entry was last changed.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating or replacing a setting entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertSetting {
    /// Setting key.
    pub key: String,
    /// Setting value.
    pub value: String,
    /// Acting admin.
    pub updated_by: i64,
}
