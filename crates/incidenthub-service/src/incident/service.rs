//! Incident lifecycle, response actions, and attachments, guarded by the
//! ownership predicates.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::info;

use incidenthub_auth::acl::{ResourceOwnership, can_act, can_read};
use incidenthub_core::error::AppError;
use incidenthub_core::types::pagination::{PageRequest, PageResponse};
use incidenthub_database::repositories::action::ActionRepository;
use incidenthub_database::repositories::attachment::AttachmentRepository;
use incidenthub_database::repositories::incident::IncidentRepository;
use incidenthub_entity::action::Action;
use incidenthub_entity::action::model::{CreateAction, UpdateAction};
use incidenthub_entity::attachment::Attachment;
use incidenthub_entity::attachment::model::CreateAttachment;
use incidenthub_entity::incident::model::{CreateIncident, UpdateIncident};
use incidenthub_entity::incident::{Incident, IncidentCategory, IncidentSeverity, IncidentStatus};
use incidenthub_entity::user::UserRole;

use crate::context::CurrentUser;
use crate::incident::storage::AttachmentStore;

/// Handles incidents, their response actions, and their attachments.
#[derive(Debug, Clone)]
pub struct IncidentService {
    incident_repo: Arc<IncidentRepository>,
    action_repo: Arc<ActionRepository>,
    attachment_repo: Arc<AttachmentRepository>,
    store: Arc<AttachmentStore>,
}

impl IncidentService {
    /// Creates a new incident service.
    pub fn new(
        incident_repo: Arc<IncidentRepository>,
        action_repo: Arc<ActionRepository>,
        attachment_repo: Arc<AttachmentRepository>,
        store: Arc<AttachmentStore>,
    ) -> Self {
        Self {
            incident_repo,
            action_repo,
            attachment_repo,
            store,
        }
    }

    /// Loads an incident and checks the read predicate.
    async fn load_for_read(&self, ctx: &CurrentUser, id: i64) -> Result<Incident, AppError> {
        let incident = self
            .incident_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Incident {id} not found")))?;

        if !can_read(ctx.role, ctx.id, &ownership_of(&incident)) {
            return Err(AppError::authorization(
                "You do not have access to this incident",
            ));
        }
        Ok(incident)
    }

    /// Loads an incident and checks the act predicate.
    async fn load_for_act(&self, ctx: &CurrentUser, id: i64) -> Result<Incident, AppError> {
        let incident = self
            .incident_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Incident {id} not found")))?;

        if !can_act(ctx.role, ctx.id, &ownership_of(&incident)) {
            return Err(AppError::authorization(
                "You do not have permission to modify this incident",
            ));
        }
        Ok(incident)
    }

    /// Gets a single incident the caller may read.
    pub async fn get(&self, ctx: &CurrentUser, id: i64) -> Result<Incident, AppError> {
        self.load_for_read(ctx, id).await
    }

    /// Lists incidents visible to the caller.
    ///
    /// System admins see everything; defense admins see the physical
    /// domain; everyone else sees their own reports.
    pub async fn list(
        &self,
        ctx: &CurrentUser,
        page: &PageRequest,
        category: Option<IncidentCategory>,
        status: Option<IncidentStatus>,
    ) -> Result<PageResponse<Incident>, AppError> {
        match ctx.role {
            UserRole::SystemAdmin => self.incident_repo.find_all(page, category, status).await,
            UserRole::DefenseAdmin => {
                self.incident_repo
                    .find_all(page, Some(IncidentCategory::Physical), status)
                    .await
            }
            UserRole::User => self.incident_repo.find_by_reporter(ctx.id, page).await,
        }
    }

    /// Reports a new incident on behalf of the caller.
    pub async fn report(
        &self,
        ctx: &CurrentUser,
        title: String,
        description: String,
        category: IncidentCategory,
        severity: IncidentSeverity,
        location: Option<String>,
        occurred_at: DateTime<Utc>,
    ) -> Result<Incident, AppError> {
        let incident = self
            .incident_repo
            .create(&CreateIncident {
                title,
                description,
                category,
                severity,
                location,
                reported_by: ctx.id,
                occurred_at,
            })
            .await?;

        info!(
            incident_id = incident.id,
            reported_by = ctx.id,
            category = %incident.category,
            "Incident reported"
        );
        Ok(incident)
    }

    /// Updates an incident the caller may act on.
    pub async fn update(
        &self,
        ctx: &CurrentUser,
        data: UpdateIncident,
    ) -> Result<Incident, AppError> {
        self.load_for_act(ctx, data.id).await?;
        self.incident_repo.update(&data).await
    }

    /// Deletes an incident the caller may act on.
    pub async fn delete(&self, ctx: &CurrentUser, id: i64) -> Result<(), AppError> {
        let incident = self.load_for_act(ctx, id).await?;

        for attachment in self.attachment_repo.find_by_incident(id).await? {
            self.store.remove(attachment.storage_key).await?;
        }
        self.incident_repo.delete(id).await?;

        info!(incident_id = incident.id, deleted_by = ctx.id, "Incident deleted");
        Ok(())
    }

    // ── Response actions ─────────────────────────────────────────

    /// Lists the response actions for an incident the caller may read.
    pub async fn list_actions(
        &self,
        ctx: &CurrentUser,
        incident_id: i64,
    ) -> Result<Vec<Action>, AppError> {
        self.load_for_read(ctx, incident_id).await?;
        self.action_repo.find_by_incident(incident_id).await
    }

    /// Records a response action against an incident the caller may act on.
    pub async fn record_action(
        &self,
        ctx: &CurrentUser,
        incident_id: i64,
        description: String,
        taken_at: DateTime<Utc>,
    ) -> Result<Action, AppError> {
        self.load_for_act(ctx, incident_id).await?;
        self.action_repo
            .create(&CreateAction {
                incident_id,
                description,
                taken_by: ctx.id,
                taken_at,
            })
            .await
    }

    /// Updates a response action on an incident the caller may act on.
    pub async fn update_action(
        &self,
        ctx: &CurrentUser,
        data: UpdateAction,
    ) -> Result<Action, AppError> {
        let action = self
            .action_repo
            .find_by_id(data.id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Action {} not found", data.id)))?;

        self.load_for_act(ctx, action.incident_id).await?;
        self.action_repo.update(&data).await
    }

    /// Deletes a response action on an incident the caller may act on.
    pub async fn delete_action(&self, ctx: &CurrentUser, id: i64) -> Result<(), AppError> {
        let action = self
            .action_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Action {id} not found")))?;

        self.load_for_act(ctx, action.incident_id).await?;
        self.action_repo.delete(id).await?;
        Ok(())
    }

    // ── Attachments ──────────────────────────────────────────────

    /// Lists attachment metadata for an incident the caller may read.
    pub async fn list_attachments(
        &self,
        ctx: &CurrentUser,
        incident_id: i64,
    ) -> Result<Vec<Attachment>, AppError> {
        self.load_for_read(ctx, incident_id).await?;
        self.attachment_repo.find_by_incident(incident_id).await
    }

    /// Stores an uploaded file against an incident the caller may read.
    ///
    /// Attaching evidence is deliberately read-gated, not act-gated: the
    /// reporter of an incident must be able to add files to their own
    /// report.
    pub async fn attach_file(
        &self,
        ctx: &CurrentUser,
        incident_id: i64,
        filename: String,
        content_type: String,
        data: Bytes,
    ) -> Result<Attachment, AppError> {
        self.load_for_read(ctx, incident_id).await?;

        let size_bytes = data.len() as i64;
        let storage_key = self.store.save(data).await?;

        let attachment = self
            .attachment_repo
            .create(&CreateAttachment {
                incident_id,
                filename,
                storage_key,
                content_type,
                size_bytes,
                uploaded_by: ctx.id,
            })
            .await?;

        info!(
            attachment_id = attachment.id,
            incident_id,
            uploaded_by = ctx.id,
            "Attachment stored"
        );
        Ok(attachment)
    }

    /// Reads an attachment's bytes if the caller may read its incident.
    pub async fn download_attachment(
        &self,
        ctx: &CurrentUser,
        attachment_id: i64,
    ) -> Result<(Attachment, Bytes), AppError> {
        let attachment = self
            .attachment_repo
            .find_by_id(attachment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Attachment {attachment_id} not found")))?;

        self.load_for_read(ctx, attachment.incident_id).await?;
        let data = self.store.read(attachment.storage_key).await?;
        Ok((attachment, data))
    }

    /// Deletes an attachment if the caller may act on its incident.
    pub async fn delete_attachment(
        &self,
        ctx: &CurrentUser,
        attachment_id: i64,
    ) -> Result<(), AppError> {
        let attachment = self
            .attachment_repo
            .find_by_id(attachment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Attachment {attachment_id} not found")))?;

        self.load_for_act(ctx, attachment.incident_id).await?;
        self.attachment_repo.delete(attachment_id).await?;
        self.store.remove(attachment.storage_key).await?;
        Ok(())
    }
}

/// The ownership descriptor of an incident.
fn ownership_of(incident: &Incident) -> ResourceOwnership {
    ResourceOwnership {
        owner_id: incident.reported_by,
        category: incident.category,
    }
}
