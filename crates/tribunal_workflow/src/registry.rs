//! Case registry
//!
//! Live case records keyed by surface id, plus a per-surface lock that
//! serializes the operations touching one surface. Everything here is
//! volatile; a restart forgets open cases, which the workflow accepts.

use crate::error::{Result, WorkflowError};
use crate::state::{CaseEvent, CaseState};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use tribunal_core::{ChannelId, UserId};

/// A case as known to this process.
#[derive(Clone, Debug)]
pub struct CaseRecord {
    pub requester: UserId,
    /// Unset when the request was filed without resolving the respondent;
    /// bound later by the first defense.
    pub respondent: Option<UserId>,
    pub state: CaseState,
    /// The channel the surface was created under.
    pub parent: ChannelId,
}

#[derive(Default)]
pub struct CaseRegistry {
    records: RwLock<HashMap<ChannelId, CaseRecord>>,
    locks: Mutex<HashMap<ChannelId, Arc<Mutex<()>>>>,
}

impl CaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly created surface. Refuses ids already registered,
    /// so a replayed submission cannot shadow a live case.
    pub async fn register(&self, surface: ChannelId, record: CaseRecord) -> Result<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&surface) {
            return Err(WorkflowError::Validation(
                "A case already exists for this surface.".to_string(),
            ));
        }
        debug!("registered case on surface {}", surface);
        records.insert(surface, record);
        Ok(())
    }

    pub async fn get(&self, surface: &ChannelId) -> Option<CaseRecord> {
        self.records.read().await.get(surface).cloned()
    }

    /// Advance the case lifecycle. `None` when the surface has no record.
    pub async fn apply_event(
        &self,
        surface: &ChannelId,
        event: &CaseEvent,
    ) -> Option<CaseState> {
        let mut records = self.records.write().await;
        let record = records.get_mut(surface)?;
        record.state = record.state.apply(event);
        Some(record.state.clone())
    }

    /// Bind the respondent on a record that does not have one yet.
    /// Returns whether the binding happened.
    pub async fn bind_respondent(&self, surface: &ChannelId, respondent: UserId) -> bool {
        let mut records = self.records.write().await;
        match records.get_mut(surface) {
            Some(record) if record.respondent.is_none() => {
                debug!("bound respondent {} on surface {}", respondent, surface);
                record.respondent = Some(respondent);
                true
            }
            _ => false,
        }
    }

    /// The lock serializing operations on one surface. Callers hold the
    /// guard for the duration of the operation, gateway calls included.
    pub async fn surface_lock(&self, surface: &ChannelId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(surface.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tribunal_core::Verdict;

    fn record() -> CaseRecord {
        CaseRecord {
            requester: UserId::new("1"),
            respondent: Some(UserId::new("2")),
            state: CaseState::UnderReview,
            parent: ChannelId::new("500"),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates() {
        let registry = CaseRegistry::new();
        let surface = ChannelId::new("777");

        registry.register(surface.clone(), record()).await.unwrap();
        let err = registry.register(surface.clone(), record()).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[tokio::test]
    async fn test_apply_event_advances_known_surfaces_only() {
        let registry = CaseRegistry::new();
        let surface = ChannelId::new("777");
        registry.register(surface.clone(), record()).await.unwrap();

        let state = registry
            .apply_event(&surface, &CaseEvent::VerdictRecorded { verdict: Verdict::Upheld })
            .await;
        assert_eq!(
            state,
            Some(CaseState::Judged {
                verdict: Verdict::Upheld
            })
        );

        let missing = registry
            .apply_event(&ChannelId::new("0"), &CaseEvent::DefensePosted)
            .await;
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_bind_respondent_only_when_unset() {
        let registry = CaseRegistry::new();
        let surface = ChannelId::new("777");
        let mut unbound = record();
        unbound.respondent = None;
        registry.register(surface.clone(), unbound).await.unwrap();

        assert!(registry.bind_respondent(&surface, UserId::new("9")).await);
        assert!(!registry.bind_respondent(&surface, UserId::new("10")).await);

        let bound = registry.get(&surface).await.unwrap();
        assert_eq!(bound.respondent, Some(UserId::new("9")));
    }

    #[tokio::test]
    async fn test_surface_lock_is_shared_per_surface() {
        let registry = CaseRegistry::new();
        let surface = ChannelId::new("777");

        let first = registry.surface_lock(&surface).await;
        let second = registry.surface_lock(&surface).await;
        assert!(Arc::ptr_eq(&first, &second));

        let other = registry.surface_lock(&ChannelId::new("778")).await;
        assert!(!Arc::ptr_eq(&first, &other));
    }
}
