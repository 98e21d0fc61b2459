//! Thread access policy
//!
//! Each case surface carries an allow-list of identities and groups.
//! Surfaces without an entry are not policed at all. The policy only
//! answers the membership question; deleting messages and notifying
//! authors is the caller's job.

use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::debug;
use tribunal_core::{ChannelId, RoleId, UserId};

#[derive(Clone, Debug, Default)]
struct AccessEntry {
    identities: HashSet<UserId>,
    groups: HashSet<RoleId>,
}

/// Per-surface participant allow-lists.
#[derive(Default)]
pub struct ThreadAccessPolicy {
    entries: RwLock<HashMap<ChannelId, AccessEntry>>,
}

impl ThreadAccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or replace) the allow-list for a surface.
    pub async fn register(
        &self,
        surface: ChannelId,
        identities: Vec<UserId>,
        groups: Vec<RoleId>,
    ) {
        debug!(
            "policing surface {} ({} identities, {} groups)",
            surface,
            identities.len(),
            groups.len()
        );
        let entry = AccessEntry {
            identities: identities.into_iter().collect(),
            groups: groups.into_iter().collect(),
        };
        self.entries.write().await.insert(surface, entry);
    }

    /// Add one identity to an existing allow-list. Unknown surfaces are
    /// left alone.
    pub async fn allow_identity(&self, surface: &ChannelId, identity: UserId) {
        if let Some(entry) = self.entries.write().await.get_mut(surface) {
            debug!("allowing {} on surface {}", identity, surface);
            entry.identities.insert(identity);
        }
    }

    /// Whether `identity` may post on `surface`. Surfaces without an entry
    /// allow everyone; privileged actors are always allowed.
    pub async fn is_allowed(
        &self,
        surface: &ChannelId,
        identity: &UserId,
        groups: &[RoleId],
        is_privileged: bool,
    ) -> bool {
        let entries = self.entries.read().await;
        let Some(entry) = entries.get(surface) else {
            return true;
        };
        if is_privileged || entry.identities.contains(identity) {
            return true;
        }
        groups.iter().any(|group| entry.groups.contains(group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id)
    }

    fn role(id: &str) -> RoleId {
        RoleId::new(id)
    }

    #[tokio::test]
    async fn test_unpoliced_surface_allows_everyone() {
        let policy = ThreadAccessPolicy::new();
        let allowed = policy
            .is_allowed(&ChannelId::new("1"), &user("42"), &[], false)
            .await;
        assert!(allowed);
    }

    #[tokio::test]
    async fn test_listed_identity_is_allowed() {
        let policy = ThreadAccessPolicy::new();
        let surface = ChannelId::new("1");
        policy
            .register(surface.clone(), vec![user("42")], vec![role("100")])
            .await;

        assert!(policy.is_allowed(&surface, &user("42"), &[], false).await);
        assert!(!policy.is_allowed(&surface, &user("43"), &[], false).await);
    }

    #[tokio::test]
    async fn test_group_intersection_is_allowed() {
        let policy = ThreadAccessPolicy::new();
        let surface = ChannelId::new("1");
        policy
            .register(surface.clone(), vec![], vec![role("100"), role("200")])
            .await;

        let member_roles = vec![role("5"), role("200")];
        assert!(policy.is_allowed(&surface, &user("9"), &member_roles, false).await);

        let outsider_roles = vec![role("5")];
        assert!(!policy.is_allowed(&surface, &user("9"), &outsider_roles, false).await);
    }

    #[tokio::test]
    async fn test_privileged_actor_bypasses_lists() {
        let policy = ThreadAccessPolicy::new();
        let surface = ChannelId::new("1");
        policy.register(surface.clone(), vec![], vec![]).await;

        assert!(policy.is_allowed(&surface, &user("9"), &[], true).await);
        assert!(!policy.is_allowed(&surface, &user("9"), &[], false).await);
    }

    #[tokio::test]
    async fn test_late_identity_binding() {
        let policy = ThreadAccessPolicy::new();
        let surface = ChannelId::new("1");
        policy.register(surface.clone(), vec![user("42")], vec![]).await;

        assert!(!policy.is_allowed(&surface, &user("77"), &[], false).await);
        policy.allow_identity(&surface, user("77")).await;
        assert!(policy.is_allowed(&surface, &user("77"), &[], false).await);

        // Unknown surfaces are not created implicitly.
        policy.allow_identity(&ChannelId::new("2"), user("77")).await;
        assert!(policy.is_allowed(&ChannelId::new("2"), &user("1"), &[], false).await);
    }
}
