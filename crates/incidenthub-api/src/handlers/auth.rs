//! Auth handlers — login, refresh, me, logout, password change.

use axum::Json;
use axum::extract::{Extension, State};
use tracing::info;
use validator::Validate;

use incidenthub_core::error::AppError;
use incidenthub_service::context::CurrentUser;

use crate::dto::request::{ChangePasswordRequest, LoginRequest, RefreshRequest};
use crate::dto::response::{
    ApiResponse, LoginResponse, MessageResponse, TokenResponse, UserResponse,
};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state.user_service.login(&req.username, &req.password).await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: outcome.access_token,
        access_expires_at: outcome.access_expires_at,
        refresh_token: outcome.refresh_token,
        refresh_expires_at: outcome.refresh_expires_at,
        password_expired: outcome.password_expired,
        user: outcome.user.into(),
    })))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    let outcome = state.user_service.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(TokenResponse {
        access_token: outcome.access_token,
        access_expires_at: outcome.access_expires_at,
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let profile = state.user_service.get_profile(&user).await?;
    Ok(Json(ApiResponse::ok(profile.into())))
}

/// POST /api/auth/logout
///
/// Tokens are never stored server-side, so logout is an acknowledgement;
/// the client discards its tokens. The route stays on the expiry whitelist
/// so a locked-out user can still sign out.
pub async fn logout(
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    info!(user_id = user.id, username = %user.username, "User logged out");
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Logged out successfully",
    ))))
}

/// PATCH /api/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state
        .user_service
        .change_password(&user, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password changed successfully",
    ))))
}
