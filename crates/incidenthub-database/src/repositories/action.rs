//! Response action repository implementation.

use sqlx::PgPool;

use incidenthub_core::error::{AppError, ErrorKind};
use incidenthub_core::result::AppResult;
use incidenthub_entity::action::Action;
use incidenthub_entity::action::model::{CreateAction, UpdateAction};

/// Repository for response actions attached to incidents.
#[derive(Debug, Clone)]
pub struct ActionRepository {
    pool: PgPool,
}

impl ActionRepository {
    /// Create a new action repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an action by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Action>> {
        sqlx::query_as::<_, Action>("SELECT * FROM actions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find action by id", e)
            })
    }

    /// List all actions for an incident, oldest first.
    pub async fn find_by_incident(&self, incident_id: i64) -> AppResult<Vec<Action>> {
        sqlx::query_as::<_, Action>(
            "SELECT * FROM actions WHERE incident_id = $1 ORDER BY taken_at ASC",
        )
        .bind(incident_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list actions", e))
    }

    /// Create a new action.
    pub async fn create(&self, data: &CreateAction) -> AppResult<Action> {
        sqlx::query_as::<_, Action>(
            "INSERT INTO actions (incident_id, description, taken_by, taken_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(data.incident_id)
        .bind(&data.description)
        .bind(data.taken_by)
        .bind(data.taken_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create action", e))
    }

    /// Update an action's mutable fields.
    pub async fn update(&self, data: &UpdateAction) -> AppResult<Action> {
        sqlx::query_as::<_, Action>(
            "UPDATE actions SET description = COALESCE($2, description), \
                                taken_at = COALESCE($3, taken_at), \
                                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.description)
        .bind(data.taken_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update action", e))?
        .ok_or_else(|| AppError::not_found(format!("Action {} not found", data.id)))
    }

    /// Delete an action by ID.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM actions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete action", e))?;

        Ok(result.rows_affected() > 0)
    }
}
