//! tribunal_core - Core types for the dispute-review workflow
//!
//! This crate provides the foundational types used across the tribunal crates:
//! - `id` - newtype ids for users, channels, messages, roles and labels
//! - `case` - verdicts, evidence kinds and the fielded form payloads
//! - `staff` - permission bits and the trusted-role rule
//! - `labels` - accent-insensitive category label matching
//! - `links` - video link validation

pub mod case;
pub mod id;
pub mod labels;
pub mod links;
pub mod staff;

// Re-export commonly used types
pub use case::{
    case_surface_name, DefenseFields, EvidenceKind, RequestFields, Verdict, VerdictFields,
    SURFACE_NAME_MAX,
};
pub use id::{ChannelId, LabelId, MessageId, RoleId, UserId};
pub use labels::{find_label, normalize_label, Label, UNDER_REVIEW_SYNONYMS};
pub use links::{is_video_link, normalized_link};
pub use staff::{parse_permissions, StaffRoles, MANAGE_MESSAGES, MANAGE_THREADS};
