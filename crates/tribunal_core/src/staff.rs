//! Trusted-actor rule
//!
//! Staff is membership in either configured panel role, or holding one of
//! the moderation permission bits on the platform.

use crate::id::RoleId;
use serde::{Deserialize, Serialize};

/// Permission bit allowing deletion of other members' messages.
pub const MANAGE_MESSAGES: u64 = 1 << 13;

/// Permission bit allowing management of discussion threads.
pub const MANAGE_THREADS: u64 = 1 << 34;

/// The two trusted guild roles recognized as staff.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StaffRoles {
    pub stewards: RoleId,
    pub directors: RoleId,
}

impl StaffRoles {
    pub fn new(stewards: RoleId, directors: RoleId) -> Self {
        Self {
            stewards,
            directors,
        }
    }

    /// Whether an actor with the given roles and permission bitfield counts
    /// as staff.
    pub fn is_staff(&self, roles: &[RoleId], permissions: u64) -> bool {
        roles
            .iter()
            .any(|role| *role == self.stewards || *role == self.directors)
            || permissions & MANAGE_MESSAGES != 0
            || permissions & MANAGE_THREADS != 0
    }
}

/// Decode the decimal permission string the platform sends on member
/// payloads. Absent or malformed values decode to no permissions.
pub fn parse_permissions(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff() -> StaffRoles {
        StaffRoles::new(RoleId::new("100"), RoleId::new("200"))
    }

    #[test]
    fn test_role_membership_grants_staff() {
        let roles = vec![RoleId::new("5"), RoleId::new("200")];
        assert!(staff().is_staff(&roles, 0));
    }

    #[test]
    fn test_permission_bits_grant_staff() {
        assert!(staff().is_staff(&[], MANAGE_MESSAGES));
        assert!(staff().is_staff(&[], MANAGE_THREADS));
        assert!(staff().is_staff(&[], MANAGE_MESSAGES | MANAGE_THREADS));
    }

    #[test]
    fn test_plain_member_is_not_staff() {
        let roles = vec![RoleId::new("5")];
        assert!(!staff().is_staff(&roles, 0));
        assert!(!staff().is_staff(&roles, 1 << 3));
    }

    #[test]
    fn test_parse_permissions_tolerates_garbage() {
        assert_eq!(parse_permissions(Some("8192")), MANAGE_MESSAGES);
        assert_eq!(parse_permissions(Some("not a number")), 0);
        assert_eq!(parse_permissions(None), 0);
    }
}
