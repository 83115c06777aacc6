//! Incident handlers.

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use validator::Validate;

use incidenthub_core::error::AppError;
use incidenthub_core::types::pagination::PageResponse;
use incidenthub_entity::incident::Incident;
use incidenthub_entity::incident::model::UpdateIncident;
use incidenthub_service::context::CurrentUser;

use crate::dto::request::{CreateIncidentRequest, IncidentListQuery, UpdateIncidentRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/incidents
pub async fn list_incidents(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<IncidentListQuery>,
) -> Result<Json<ApiResponse<PageResponse<Incident>>>, AppError> {
    let page = incidenthub_core::types::pagination::PageRequest::new(
        query.page.unwrap_or(1),
        query.page_size.unwrap_or(25),
    );
    let incidents = state
        .incident_service
        .list(&user, &page, query.category, query.status)
        .await?;

    Ok(Json(ApiResponse::ok(incidents)))
}

/// POST /api/incidents
pub async fn report_incident(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateIncidentRequest>,
) -> Result<Json<ApiResponse<Incident>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let incident = state
        .incident_service
        .report(
            &user,
            req.title,
            req.description,
            req.category,
            req.severity,
            req.location,
            req.occurred_at,
        )
        .await?;

    Ok(Json(ApiResponse::ok(incident)))
}

/// GET /api/incidents/{id}
pub async fn get_incident(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Incident>>, AppError> {
    let incident = state.incident_service.get(&user, id).await?;
    Ok(Json(ApiResponse::ok(incident)))
}

/// PUT /api/incidents/{id}
pub async fn update_incident(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateIncidentRequest>,
) -> Result<Json<ApiResponse<Incident>>, AppError> {
    let incident = state
        .incident_service
        .update(
            &user,
            UpdateIncident {
                id,
                title: req.title,
                description: req.description,
                severity: req.severity,
                status: req.status,
                location: req.location,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(incident)))
}

/// DELETE /api/incidents/{id}
pub async fn delete_incident(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.incident_service.delete(&user, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Incident deleted",
    ))))
}
