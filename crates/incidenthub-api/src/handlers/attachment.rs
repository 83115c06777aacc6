//! Attachment handlers — multipart upload and download.

use axum::Json;
use axum::extract::{Extension, Multipart, Path, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::IntoResponse;

use incidenthub_core::error::AppError;
use incidenthub_entity::attachment::Attachment;
use incidenthub_service::context::CurrentUser;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/incidents/{id}/attachments
pub async fn list_attachments(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(incident_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Attachment>>>, AppError> {
    let attachments = state
        .incident_service
        .list_attachments(&user, incident_id)
        .await?;
    Ok(Json(ApiResponse::ok(attachments)))
}

/// POST /api/incidents/{id}/attachments
pub async fn upload_attachment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(incident_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Attachment>>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .unwrap_or("attachment")
            .to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;

        if data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }

        let attachment = state
            .incident_service
            .attach_file(&user, incident_id, filename, content_type, data)
            .await?;

        return Ok(Json(ApiResponse::ok(attachment)));
    }

    Err(AppError::validation("Missing 'file' field in upload"))
}

/// GET /api/attachments/{id}/download
pub async fn download_attachment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let (attachment, data) = state
        .incident_service
        .download_attachment(&user, id)
        .await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&attachment.content_type)
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    let disposition = format!(
        "attachment; filename=\"{}\"",
        attachment.filename.replace('"', "")
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or(HeaderValue::from_static("attachment")),
    );

    Ok((headers, data))
}

/// DELETE /api/attachments/{id}
pub async fn delete_attachment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.incident_service.delete_attachment(&user, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Attachment deleted",
    ))))
}
