//! Session store

use crate::structs::{SessionKind, SessionPayload};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, trace};
use tribunal_core::UserId;

struct SessionEntry {
    payload: SessionPayload,
    expires_at: Instant,
}

impl SessionEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// In-memory store of short-lived per-actor workflow state.
///
/// One slot per (owner, kind); a newer `put` replaces the previous entry
/// and restarts its clock. There is no background sweeper: any read that
/// encounters a dead entry drops it, and a dead entry is indistinguishable
/// from an absent one.
#[derive(Default)]
pub struct SessionStore {
    entries: RwLock<HashMap<(UserId, SessionKind), SessionEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session for `owner`, replacing any previous session of the
    /// same kind.
    pub async fn put(&self, owner: UserId, payload: SessionPayload, ttl: Duration) {
        let kind = payload.kind();
        trace!("storing {:?} session for {} (ttl {}s)", kind, owner, ttl.as_secs());
        let entry = SessionEntry {
            payload,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert((owner, kind), entry);
    }

    /// Read a live session without consuming it.
    pub async fn peek(&self, owner: &UserId, kind: SessionKind) -> Option<SessionPayload> {
        let key = (owner.clone(), kind);
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get(&key) {
            Some(entry) if entry.is_live(now) => Some(entry.payload.clone()),
            Some(_) => {
                entries.remove(&key);
                debug!("dropped expired {:?} session for {}", kind, owner);
                None
            }
            None => None,
        }
    }

    /// Consume a live session. `None` means absent or expired, which is an
    /// expected outcome for the caller to report, never a failure here.
    pub async fn take(&self, owner: &UserId, kind: SessionKind) -> Option<SessionPayload> {
        let key = (owner.clone(), kind);
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let entry = entries.remove(&key)?;
        if entry.is_live(now) {
            trace!("consumed {:?} session for {}", kind, owner);
            Some(entry.payload)
        } else {
            debug!("dropped expired {:?} session for {}", kind, owner);
            None
        }
    }
}
