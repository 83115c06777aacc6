//! User management handlers (system-admin routes).

use axum::Json;
use axum::extract::{Path, Query, State};
use validator::Validate;

use incidenthub_core::error::AppError;
use incidenthub_core::types::pagination::PageResponse;
use incidenthub_entity::user::model::UpdateUser;
use incidenthub_entity::user::{UserRole, UserStatus};

use crate::dto::request::{
    ChangeRoleRequest, ChangeStatusRequest, CreateUserRequest, PageQuery, ResetPasswordRequest,
    UpdateUserRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, AppError> {
    let page = query.to_page_request();
    let users = state.user_service.list_users(&page).await?;

    let items: Vec<UserResponse> = users.items.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::ok(PageResponse::new(
        items,
        users.page,
        users.page_size,
        users.total_items,
    ))))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let role: UserRole = req.role.parse()?;
    let user = state
        .user_service
        .create_user(req.username, req.fullname, req.position, &req.password, role)
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state
        .user_service
        .update_user(&UpdateUser {
            id,
            fullname: req.fullname,
            position: req.position,
        })
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}/role
pub async fn change_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ChangeRoleRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let role: UserRole = req.role.parse()?;
    let user = state.user_service.change_role(id, role).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}/status
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ChangeStatusRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let status: UserStatus = req.status.parse()?;
    let user = state.user_service.change_status(id, status).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}/password
pub async fn reset_password(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state.user_service.reset_password(id, &req.new_password).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Password reset"))))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.user_service.delete_user(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("User deleted"))))
}
