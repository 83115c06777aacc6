//! System settings repository implementation.

use sqlx::PgPool;

use incidenthub_core::error::{AppError, ErrorKind};
use incidenthub_core::result::AppResult;
use incidenthub_entity::settings::SettingEntry;
use incidenthub_entity::settings::model::UpsertSetting;

/// Repository for key/value system settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a setting by key.
    pub async fn find_by_key(&self, key: &str) -> AppResult<Option<SettingEntry>> {
        sqlx::query_as::<_, SettingEntry>("SELECT * FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find setting", e))
    }

    /// List all settings ordered by key.
    pub async fn find_all(&self) -> AppResult<Vec<SettingEntry>> {
        sqlx::query_as::<_, SettingEntry>("SELECT * FROM settings ORDER BY key ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list settings", e))
    }

    /// Insert or replace a setting entry.
    pub async fn upsert(&self, data: &UpsertSetting) -> AppResult<SettingEntry> {
        sqlx::query_as::<_, SettingEntry>(
            "INSERT INTO settings (key, value, updated_by, updated_at) \
             VALUES ($1, $2, $3, NOW()) \
             ON CONFLICT (key) DO UPDATE \
             SET value = EXCLUDED.value, updated_by = EXCLUDED.updated_by, updated_at = NOW() \
             RETURNING *",
        )
        .bind(&data.key)
        .bind(&data.value)
        .bind(data.updated_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert setting", e))
    }

    /// Delete a setting by key.
    pub async fn delete(&self, key: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete setting", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
