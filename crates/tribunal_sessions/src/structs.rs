//! Session data shapes

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tribunal_core::{ChannelId, EvidenceKind, UserId};

/// The session slots an actor can hold. One live session per (owner, kind).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Pick,
    Capture,
    Defense,
}

/// State carried by a live session. The variant determines the slot the
/// session occupies.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionPayload {
    /// Respondent selection for a case being opened. `respondent` stays
    /// `None` until the requester picks someone.
    Pick { respondent: Option<UserId> },

    /// A window during which the owner's next attachment-bearing message
    /// in `surface` is captured as evidence.
    Capture {
        evidence: EvidenceKind,
        surface: ChannelId,
    },

    /// A defense form opened from `surface`.
    Defense { surface: ChannelId },
}

impl SessionPayload {
    /// The slot this payload occupies.
    pub fn kind(&self) -> SessionKind {
        match self {
            SessionPayload::Pick { .. } => SessionKind::Pick,
            SessionPayload::Capture { .. } => SessionKind::Capture,
            SessionPayload::Defense { .. } => SessionKind::Defense,
        }
    }
}

/// Time-to-live policy, one duration per session kind.
#[derive(Clone, Copy, Debug)]
pub struct SessionTtls {
    pub pick: Duration,
    pub capture: Duration,
    pub defense: Duration,
}

impl Default for SessionTtls {
    fn default() -> Self {
        Self {
            pick: Duration::from_secs(10 * 60),
            capture: Duration::from_secs(2 * 60),
            defense: Duration::from_secs(30 * 60),
        }
    }
}

impl SessionTtls {
    /// TTL to apply when storing a session of the given kind.
    pub fn for_kind(&self, kind: SessionKind) -> Duration {
        match kind {
            SessionKind::Pick => self.pick,
            SessionKind::Capture => self.capture,
            SessionKind::Defense => self.defense,
        }
    }
}
