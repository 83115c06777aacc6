//! Ownership/role predicates shared by the incident and resource modules.
//!
//! Pure functions of the acting identity and a resource's ownership
//! descriptor; no I/O, independently testable.

use incidenthub_entity::incident::IncidentCategory;
use incidenthub_entity::user::UserRole;

/// The ownership descriptor every guarded record exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceOwnership {
    /// The owning user.
    pub owner_id: i64,
    /// The record's security domain.
    pub category: IncidentCategory,
}

/// Whether the identity may read the resource.
///
/// System admins read everything. Defense admins read the physical domain.
/// Everyone else reads only what they own.
pub fn can_read(role: UserRole, user_id: i64, resource: &ResourceOwnership) -> bool {
    match role {
        UserRole::SystemAdmin => true,
        UserRole::DefenseAdmin if resource.category == IncidentCategory::Physical => true,
        _ => resource.owner_id == user_id,
    }
}

/// Whether the identity may act on (mutate) the resource.
///
/// Stricter than [`can_read`]: there is no owner fallback, so a regular
/// user can see their own records but never mutate them after the fact.
pub fn can_act(role: UserRole, _user_id: i64, resource: &ResourceOwnership) -> bool {
    match role {
        UserRole::SystemAdmin => true,
        UserRole::DefenseAdmin => resource.category == IncidentCategory::Physical,
        UserRole::User => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physical(owner_id: i64) -> ResourceOwnership {
        ResourceOwnership {
            owner_id,
            category: IncidentCategory::Physical,
        }
    }

    fn cyber(owner_id: i64) -> ResourceOwnership {
        ResourceOwnership {
            owner_id,
            category: IncidentCategory::Cyber,
        }
    }

    #[test]
    fn test_system_admin_reads_and_acts_everywhere() {
        assert!(can_read(UserRole::SystemAdmin, 1, &cyber(99)));
        assert!(can_act(UserRole::SystemAdmin, 1, &physical(99)));
    }

    #[test]
    fn test_defense_admin_is_bound_to_physical() {
        assert!(can_read(UserRole::DefenseAdmin, 1, &physical(99)));
        assert!(!can_read(UserRole::DefenseAdmin, 1, &cyber(99)));
        assert!(can_act(UserRole::DefenseAdmin, 1, &physical(99)));
        assert!(!can_act(UserRole::DefenseAdmin, 1, &cyber(99)));
    }

    #[test]
    fn test_owner_can_read_but_not_act() {
        assert!(can_read(UserRole::User, 5, &cyber(5)));
        assert!(!can_read(UserRole::User, 5, &cyber(6)));
        assert!(!can_act(UserRole::User, 5, &cyber(5)));
    }

    #[test]
    fn test_defense_admin_owner_fallback_on_read() {
        // Outside the physical domain a defense-admin is an ordinary owner.
        assert!(can_read(UserRole::DefenseAdmin, 5, &cyber(5)));
        assert!(!can_act(UserRole::DefenseAdmin, 5, &cyber(5)));
    }
}
