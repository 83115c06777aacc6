//! Protected resource CRUD, guarded by the ownership predicates.

use std::sync::Arc;

use incidenthub_auth::acl::{ResourceOwnership, can_act, can_read};
use incidenthub_core::error::AppError;
use incidenthub_core::types::pagination::{PageRequest, PageResponse};
use incidenthub_database::repositories::resource::ResourceRepository;
use incidenthub_entity::incident::IncidentCategory;
use incidenthub_entity::resource::Resource;
use incidenthub_entity::resource::model::{CreateResource, UpdateResource};
use incidenthub_entity::user::UserRole;

use crate::context::CurrentUser;

/// Handles protected resource management.
#[derive(Debug, Clone)]
pub struct ResourceService {
    resource_repo: Arc<ResourceRepository>,
}

impl ResourceService {
    /// Creates a new resource service.
    pub fn new(resource_repo: Arc<ResourceRepository>) -> Self {
        Self { resource_repo }
    }

    /// Loads a resource and checks the given predicate.
    async fn load_checked(
        &self,
        ctx: &CurrentUser,
        id: i64,
        predicate: fn(UserRole, i64, &ResourceOwnership) -> bool,
        denial: &str,
    ) -> Result<Resource, AppError> {
        let resource = self
            .resource_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Resource {id} not found")))?;

        let ownership = ResourceOwnership {
            owner_id: resource.owner_id,
            category: resource.category,
        };
        if !predicate(ctx.role, ctx.id, &ownership) {
            return Err(AppError::authorization(denial));
        }
        Ok(resource)
    }

    /// Gets a single resource the caller may read.
    pub async fn get(&self, ctx: &CurrentUser, id: i64) -> Result<Resource, AppError> {
        self.load_checked(
            ctx,
            id,
            can_read,
            "You do not have access to this resource",
        )
        .await
    }

    /// Lists resources visible to the caller.
    pub async fn list(
        &self,
        ctx: &CurrentUser,
        page: &PageRequest,
        category: Option<IncidentCategory>,
    ) -> Result<PageResponse<Resource>, AppError> {
        match ctx.role {
            UserRole::SystemAdmin => self.resource_repo.find_all(page, category).await,
            UserRole::DefenseAdmin => {
                self.resource_repo
                    .find_all(page, Some(IncidentCategory::Physical))
                    .await
            }
            UserRole::User => {
                // Regular users see nothing in bulk; ownership is checked
                // per-record on direct access.
                Ok(PageResponse::new(Vec::new(), page.page, page.page_size, 0))
            }
        }
    }

    /// Creates a new resource (admin routes only).
    pub async fn create(&self, data: &CreateResource) -> Result<Resource, AppError> {
        self.resource_repo.create(data).await
    }

    /// Updates a resource the caller may act on.
    pub async fn update(
        &self,
        ctx: &CurrentUser,
        data: UpdateResource,
    ) -> Result<Resource, AppError> {
        self.load_checked(
            ctx,
            data.id,
            can_act,
            "You do not have permission to modify this resource",
        )
        .await?;
        self.resource_repo.update(&data).await
    }

    /// Deletes a resource the caller may act on.
    pub async fn delete(&self, ctx: &CurrentUser, id: i64) -> Result<(), AppError> {
        self.load_checked(
            ctx,
            id,
            can_act,
            "You do not have permission to modify this resource",
        )
        .await?;
        self.resource_repo.delete(id).await?;
        Ok(())
    }
}
