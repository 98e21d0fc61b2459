//! tribunal_sessions - Short-lived per-actor workflow state
//!
//! Every multi-step interaction in the workflow parks its intermediate
//! state here: the respondent pick behind a case being opened, an open
//! defense form, or an attachment-capture window. Entries expire on a
//! per-kind TTL and are evicted lazily by the reads that encounter them.

pub mod store;
pub mod structs;

pub use store::SessionStore;
pub use structs::{SessionKind, SessionPayload, SessionTtls};
