//! Key/value system settings. Reads are open to any authenticated user;
//! writes go through the system-admin route gate.

use std::sync::Arc;

use tracing::info;

use incidenthub_core::error::AppError;
use incidenthub_database::repositories::settings::SettingsRepository;
use incidenthub_entity::settings::SettingEntry;
use incidenthub_entity::settings::model::UpsertSetting;

use crate::context::CurrentUser;

/// Handles system settings management.
#[derive(Debug, Clone)]
pub struct SettingsService {
    settings_repo: Arc<SettingsRepository>,
}

impl SettingsService {
    /// Creates a new settings service.
    pub fn new(settings_repo: Arc<SettingsRepository>) -> Self {
        Self { settings_repo }
    }

    /// Lists all settings.
    pub async fn list(&self) -> Result<Vec<SettingEntry>, AppError> {
        self.settings_repo.find_all().await
    }

    /// Gets a setting by key.
    pub async fn get(&self, key: &str) -> Result<SettingEntry, AppError> {
        self.settings_repo
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Setting '{key}' not found")))
    }

    /// Creates or replaces a setting entry.
    pub async fn upsert(
        &self,
        ctx: &CurrentUser,
        key: String,
        value: String,
    ) -> Result<SettingEntry, AppError> {
        let entry = self
            .settings_repo
            .upsert(&UpsertSetting {
                key,
                value,
                updated_by: ctx.id,
            })
            .await?;

        info!(key = %entry.key, updated_by = ctx.id, "Setting updated");
        Ok(entry)
    }

    /// Deletes a setting by key.
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        if !self.settings_repo.delete(key).await? {
            return Err(AppError::not_found(format!("Setting '{key}' not found")));
        }
        Ok(())
    }
}
