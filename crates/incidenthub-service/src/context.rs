//! Request context carrying the authenticated identity.

use serde::{Deserialize, Serialize};

use incidenthub_entity::user::UserRole;

/// The identity the access-control middleware resolved for this request.
///
/// Attached as a request extension after authentication succeeds and passed
/// into service methods so every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// The authenticated user's numeric ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Full name.
    pub fullname: String,
    /// Role at authentication time.
    pub role: UserRole,
}

impl CurrentUser {
    /// Returns whether the current user is a system administrator.
    pub fn is_system_admin(&self) -> bool {
        self.role.is_system_admin()
    }
}
