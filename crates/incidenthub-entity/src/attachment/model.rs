//! Attachment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file attached to an incident. The bytes live on local disk under the
/// configured upload root; this row holds only metadata.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attachment {
    /// Unique attachment identifier.
    pub id: i64,
    /// The incident this file belongs to.
    pub incident_id: i64,
    /// Original client-supplied filename.
    pub filename: String,
    /// Opaque on-disk storage key.
    pub storage_key: Uuid,
    /// MIME type as reported at upload.
    pub content_type: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// The user who uploaded the file.
    pub uploaded_by: i64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new attachment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAttachment {
    /// Parent incident.
    pub incident_id: i64,
    /// Original filename.
    pub filename: String,
    /// On-disk storage key.
    pub storage_key: Uuid,
    /// MIME type.
    pub content_type: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Uploading user.
    pub uploaded_by: i64,
}
