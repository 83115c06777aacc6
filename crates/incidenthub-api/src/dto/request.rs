//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use incidenthub_entity::incident::{IncidentCategory, IncidentSeverity, IncidentStatus};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Username.
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    /// Full name.
    #[validate(length(min = 1))]
    pub fullname: String,
    /// Position.
    pub position: Option<String>,
    /// Initial password.
    #[validate(length(min = 8))]
    pub password: String,
    /// Role wire string.
    pub role: String,
}

/// Update user profile request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New full name.
    pub fullname: Option<String>,
    /// New position.
    pub position: Option<String>,
}

/// Change role request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    /// New role wire string.
    pub role: String,
}

/// Change status request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    /// New status wire string.
    pub status: String,
}

/// Admin password reset request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// New password.
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Report incident request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateIncidentRequest {
    /// Title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Description.
    #[validate(length(min = 1))]
    pub description: String,
    /// Category.
    pub category: IncidentCategory,
    /// Severity.
    pub severity: IncidentSeverity,
    /// Location (optional).
    pub location: Option<String>,
    /// When the incident occurred.
    pub occurred_at: DateTime<Utc>,
}

/// Update incident request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateIncidentRequest {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New severity.
    pub severity: Option<IncidentSeverity>,
    /// New workflow status.
    pub status: Option<IncidentStatus>,
    /// New location.
    pub location: Option<String>,
}

/// Record action request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateActionRequest {
    /// What was done.
    #[validate(length(min = 1))]
    pub description: String,
    /// When it was done (defaults to now).
    pub taken_at: Option<DateTime<Utc>>,
}

/// Update action request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateActionRequest {
    /// New description.
    pub description: Option<String>,
    /// New performed-at timestamp.
    pub taken_at: Option<DateTime<Utc>>,
}

/// Create resource request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateResourceRequest {
    /// Resource name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Category.
    pub category: IncidentCategory,
    /// Description.
    pub description: Option<String>,
    /// Responsible user.
    pub owner_id: i64,
}

/// Update resource request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResourceRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New responsible user.
    pub owner_id: Option<i64>,
}

/// Create/replace setting request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertSettingRequest {
    /// Setting value.
    #[validate(length(min = 1))]
    pub value: String,
}

/// Pagination query parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PageQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

impl PageQuery {
    /// Convert into a clamped page request.
    pub fn to_page_request(&self) -> incidenthub_core::types::pagination::PageRequest {
        incidenthub_core::types::pagination::PageRequest::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(25),
        )
    }
}

/// Incident list filters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IncidentListQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
    /// Category filter.
    pub category: Option<IncidentCategory>,
    /// Status filter.
    pub status: Option<IncidentStatus>,
}

/// Resource list filters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResourceListQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
    /// Category filter.
    pub category: Option<IncidentCategory>,
}
