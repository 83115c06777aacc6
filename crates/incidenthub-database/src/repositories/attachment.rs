//! Attachment metadata repository implementation.

use sqlx::PgPool;

use incidenthub_core::error::{AppError, ErrorKind};
use incidenthub_core::result::AppResult;
use incidenthub_entity::attachment::Attachment;
use incidenthub_entity::attachment::model::CreateAttachment;

/// Repository for attachment metadata rows.
#[derive(Debug, Clone)]
pub struct AttachmentRepository {
    pool: PgPool,
}

impl AttachmentRepository {
    /// Create a new attachment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an attachment by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Attachment>> {
        sqlx::query_as::<_, Attachment>("SELECT * FROM attachments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find attachment by id", e)
            })
    }

    /// List all attachments for an incident, newest first.
    pub async fn find_by_incident(&self, incident_id: i64) -> AppResult<Vec<Attachment>> {
        sqlx::query_as::<_, Attachment>(
            "SELECT * FROM attachments WHERE incident_id = $1 ORDER BY created_at DESC",
        )
        .bind(incident_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list attachments", e))
    }

    /// Create a new attachment record.
    pub async fn create(&self, data: &CreateAttachment) -> AppResult<Attachment> {
        sqlx::query_as::<_, Attachment>(
            "INSERT INTO attachments \
             (incident_id, filename, storage_key, content_type, size_bytes, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(data.incident_id)
        .bind(&data.filename)
        .bind(data.storage_key)
        .bind(&data.content_type)
        .bind(data.size_bytes)
        .bind(data.uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create attachment", e))
    }

    /// Delete an attachment record by ID.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM attachments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete attachment", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
