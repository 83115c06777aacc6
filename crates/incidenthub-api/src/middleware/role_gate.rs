//! Role gate — restricts a route subtree to a set of roles.
//!
//! Composes after the access-control middleware, never before: it reads the
//! [`CurrentUser`] extension that middleware attaches. The system-admin role
//! passes every gate.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use incidenthub_core::error::AppError;
use incidenthub_entity::user::UserRole;
use incidenthub_service::context::CurrentUser;

/// Whether a role is a member of the allowed set.
///
/// System admins pass regardless of the configured set.
pub fn role_allows(role: UserRole, allowed: &[UserRole]) -> bool {
    role.is_system_admin() || allowed.contains(&role)
}

/// String-level variant for roles from untyped sources.
///
/// Comparison is case-insensitive; a value that is not one of the three
/// known roles never passes.
pub fn role_allows_str(role: &str, allowed: &[UserRole]) -> bool {
    match role.parse::<UserRole>() {
        Ok(role) => role_allows(role, allowed),
        Err(_) => false,
    }
}

/// Middleware that rejects identities outside the allowed role set.
pub async fn require_any_role(
    allowed: &'static [UserRole],
    request: Request,
    next: Next,
) -> Response {
    let Some(user) = request.extensions().get::<CurrentUser>() else {
        // The gate ran before authentication; nothing to decide on.
        return AppError::authentication("Authentication required").into_response();
    };

    if role_allows(user.role, allowed) {
        next.run(request).await
    } else {
        AppError::authorization("Your role does not permit this operation").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_admin_passes_any_gate() {
        assert!(role_allows(
            UserRole::SystemAdmin,
            &[UserRole::DefenseAdmin]
        ));
        assert!(role_allows(UserRole::SystemAdmin, &[]));
    }

    #[test]
    fn test_member_roles_pass() {
        assert!(role_allows(UserRole::DefenseAdmin, &[UserRole::DefenseAdmin]));
        assert!(!role_allows(UserRole::User, &[UserRole::DefenseAdmin]));
    }

    #[test]
    fn test_string_variant_is_case_insensitive() {
        assert!(role_allows_str("Defense-Admin", &[UserRole::DefenseAdmin]));
        assert!(role_allows_str("SYSTEM-ADMIN", &[UserRole::DefenseAdmin]));
    }

    #[test]
    fn test_unknown_role_never_passes() {
        assert!(!role_allows_str("root", &[UserRole::DefenseAdmin]));
        assert!(!role_allows_str("", &[UserRole::User]));
    }
}
