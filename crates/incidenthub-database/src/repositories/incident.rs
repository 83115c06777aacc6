//! Incident repository implementation.

use sqlx::PgPool;

use incidenthub_core::error::{AppError, ErrorKind};
use incidenthub_core::result::AppResult;
use incidenthub_core::types::pagination::{PageRequest, PageResponse};
use incidenthub_entity::incident::model::{CreateIncident, UpdateIncident};
use incidenthub_entity::incident::{Incident, IncidentCategory, IncidentStatus};

/// Repository for incident CRUD and query operations.
#[derive(Debug, Clone)]
pub struct IncidentRepository {
    pool: PgPool,
}

impl IncidentRepository {
    /// Create a new incident repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an incident by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Incident>> {
        sqlx::query_as::<_, Incident>("SELECT * FROM incidents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find incident by id", e)
            })
    }

    /// List incidents with pagination and optional category/status filters.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        category: Option<IncidentCategory>,
        status: Option<IncidentStatus>,
    ) -> AppResult<PageResponse<Incident>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM incidents \
             WHERE ($1::incident_category IS NULL OR category = $1) \
               AND ($2::incident_status IS NULL OR status = $2)",
        )
        .bind(category)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count incidents", e))?;

        let incidents = sqlx::query_as::<_, Incident>(
            "SELECT * FROM incidents \
             WHERE ($1::incident_category IS NULL OR category = $1) \
               AND ($2::incident_status IS NULL OR status = $2) \
             ORDER BY occurred_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(category)
        .bind(status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list incidents", e))?;

        Ok(PageResponse::new(
            incidents,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List incidents reported by a specific user.
    pub async fn find_by_reporter(
        &self,
        reporter_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Incident>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM incidents WHERE reported_by = $1")
                .bind(reporter_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count incidents", e)
                })?;

        let incidents = sqlx::query_as::<_, Incident>(
            "SELECT * FROM incidents WHERE reported_by = $1 \
             ORDER BY occurred_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(reporter_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list incidents by reporter", e)
        })?;

        Ok(PageResponse::new(
            incidents,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new incident.
    pub async fn create(&self, data: &CreateIncident) -> AppResult<Incident> {
        sqlx::query_as::<_, Incident>(
            "INSERT INTO incidents \
             (title, description, category, severity, location, reported_by, occurred_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.category)
        .bind(data.severity)
        .bind(&data.location)
        .bind(data.reported_by)
        .bind(data.occurred_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create incident", e))
    }

    /// Update an incident's mutable fields.
    pub async fn update(&self, data: &UpdateIncident) -> AppResult<Incident> {
        sqlx::query_as::<_, Incident>(
            "UPDATE incidents SET title = COALESCE($2, title), \
                                  description = COALESCE($3, description), \
                                  severity = COALESCE($4, severity), \
                                  status = COALESCE($5, status), \
                                  location = COALESCE($6, location), \
                                  updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.severity)
        .bind(data.status)
        .bind(&data.location)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update incident", e))?
        .ok_or_else(|| AppError::not_found(format!("Incident {} not found", data.id)))
    }

    /// Delete an incident by ID.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM incidents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete incident", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
