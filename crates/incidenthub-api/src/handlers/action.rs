//! Response action handlers.

use axum::Json;
use axum::extract::{Extension, Path, State};
use chrono::Utc;
use validator::Validate;

use incidenthub_core::error::AppError;
use incidenthub_entity::action::Action;
use incidenthub_entity::action::model::UpdateAction;
use incidenthub_service::context::CurrentUser;

use crate::dto::request::{CreateActionRequest, UpdateActionRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/incidents/{id}/actions
pub async fn list_actions(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(incident_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Action>>>, AppError> {
    let actions = state
        .incident_service
        .list_actions(&user, incident_id)
        .await?;
    Ok(Json(ApiResponse::ok(actions)))
}

/// POST /api/incidents/{id}/actions
pub async fn record_action(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(incident_id): Path<i64>,
    Json(req): Json<CreateActionRequest>,
) -> Result<Json<ApiResponse<Action>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let action = state
        .incident_service
        .record_action(
            &user,
            incident_id,
            req.description,
            req.taken_at.unwrap_or_else(Utc::now),
        )
        .await?;

    Ok(Json(ApiResponse::ok(action)))
}

/// PUT /api/actions/{id}
pub async fn update_action(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateActionRequest>,
) -> Result<Json<ApiResponse<Action>>, AppError> {
    let action = state
        .incident_service
        .update_action(
            &user,
            UpdateAction {
                id,
                description: req.description,
                taken_at: req.taken_at,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(action)))
}

/// DELETE /api/actions/{id}
pub async fn delete_action(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.incident_service.delete_action(&user, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Action deleted"))))
}
