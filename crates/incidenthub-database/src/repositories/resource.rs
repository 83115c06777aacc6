//! Protected resource repository implementation.

use sqlx::PgPool;

use incidenthub_core::error::{AppError, ErrorKind};
use incidenthub_core::result::AppResult;
use incidenthub_core::types::pagination::{PageRequest, PageResponse};
use incidenthub_entity::incident::IncidentCategory;
use incidenthub_entity::resource::Resource;
use incidenthub_entity::resource::model::{CreateResource, UpdateResource};

/// Repository for protected resources.
#[derive(Debug, Clone)]
pub struct ResourceRepository {
    pool: PgPool,
}

impl ResourceRepository {
    /// Create a new resource repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a resource by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Resource>> {
        sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find resource by id", e)
            })
    }

    /// List resources with pagination and an optional category filter.
    pub async fn find_all(
        &self,
        page: &PageRequest,
        category: Option<IncidentCategory>,
    ) -> AppResult<PageResponse<Resource>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM resources \
             WHERE ($1::incident_category IS NULL OR category = $1)",
        )
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count resources", e))?;

        let resources = sqlx::query_as::<_, Resource>(
            "SELECT * FROM resources \
             WHERE ($1::incident_category IS NULL OR category = $1) \
             ORDER BY name ASC LIMIT $2 OFFSET $3",
        )
        .bind(category)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list resources", e))?;

        Ok(PageResponse::new(
            resources,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new resource.
    pub async fn create(&self, data: &CreateResource) -> AppResult<Resource> {
        sqlx::query_as::<_, Resource>(
            "INSERT INTO resources (name, category, description, owner_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(data.category)
        .bind(&data.description)
        .bind(data.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create resource", e))
    }

    /// Update a resource's mutable fields.
    pub async fn update(&self, data: &UpdateResource) -> AppResult<Resource> {
        sqlx::query_as::<_, Resource>(
            "UPDATE resources SET name = COALESCE($2, name), \
                                  description = COALESCE($3, description), \
                                  owner_id = COALESCE($4, owner_id), \
                                  updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update resource", e))?
        .ok_or_else(|| AppError::not_found(format!("Resource {} not found", data.id)))
    }

    /// Delete a resource by ID.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete resource", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
