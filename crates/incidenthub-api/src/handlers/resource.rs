//! Protected resource handlers.

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use validator::Validate;

use incidenthub_core::error::AppError;
use incidenthub_core::types::pagination::{PageRequest, PageResponse};
use incidenthub_entity::resource::Resource;
use incidenthub_entity::resource::model::{CreateResource, UpdateResource};
use incidenthub_service::context::CurrentUser;

use crate::dto::request::{CreateResourceRequest, ResourceListQuery, UpdateResourceRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/resources
pub async fn list_resources(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ResourceListQuery>,
) -> Result<Json<ApiResponse<PageResponse<Resource>>>, AppError> {
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(25));
    let resources = state
        .resource_service
        .list(&user, &page, query.category)
        .await?;
    Ok(Json(ApiResponse::ok(resources)))
}

/// GET /api/resources/{id}
pub async fn get_resource(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Resource>>, AppError> {
    let resource = state.resource_service.get(&user, id).await?;
    Ok(Json(ApiResponse::ok(resource)))
}

/// POST /api/resources (system-admin)
pub async fn create_resource(
    State(state): State<AppState>,
    Json(req): Json<CreateResourceRequest>,
) -> Result<Json<ApiResponse<Resource>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let resource = state
        .resource_service
        .create(&CreateResource {
            name: req.name,
            category: req.category,
            description: req.description,
            owner_id: req.owner_id,
        })
        .await?;

    Ok(Json(ApiResponse::ok(resource)))
}

/// PUT /api/resources/{id}
pub async fn update_resource(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateResourceRequest>,
) -> Result<Json<ApiResponse<Resource>>, AppError> {
    let resource = state
        .resource_service
        .update(
            &user,
            UpdateResource {
                id,
                name: req.name,
                description: req.description,
                owner_id: req.owner_id,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(resource)))
}

/// DELETE /api/resources/{id}
pub async fn delete_resource(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.resource_service.delete(&user, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Resource deleted",
    ))))
}
