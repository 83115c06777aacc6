//! System settings handlers.

use axum::Json;
use axum::extract::{Extension, Path, State};
use validator::Validate;

use incidenthub_core::error::AppError;
use incidenthub_entity::settings::SettingEntry;
use incidenthub_service::context::CurrentUser;

use crate::dto::request::UpsertSettingRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/settings
pub async fn list_settings(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SettingEntry>>>, AppError> {
    let settings = state.settings_service.list().await?;
    Ok(Json(ApiResponse::ok(settings)))
}

/// GET /api/settings/{key}
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<SettingEntry>>, AppError> {
    let setting = state.settings_service.get(&key).await?;
    Ok(Json(ApiResponse::ok(setting)))
}

/// PUT /api/settings/{key} (system-admin)
pub async fn upsert_setting(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(key): Path<String>,
    Json(req): Json<UpsertSettingRequest>,
) -> Result<Json<ApiResponse<SettingEntry>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let setting = state.settings_service.upsert(&user, key, req.value).await?;
    Ok(Json(ApiResponse::ok(setting)))
}

/// DELETE /api/settings/{key} (system-admin)
pub async fn delete_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.settings_service.delete(&key).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Setting deleted",
    ))))
}
