//! tribunal_workflow - The dispute-review case workflow
//!
//! Everything between an inbound platform event and the gateway calls it
//! causes lives here:
//! - `access` - per-surface participant allow-lists
//! - `state` - the case lifecycle state machine
//! - `registry` - live case records and per-surface serialization
//! - `events` - typed inbound events and the single-shot reply
//! - `messages` - user-facing message, form and component builders
//! - `engine` - the workflow operations
//! - `dispatcher` - event routing and error-to-notice mapping

pub mod access;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod events;
pub mod messages;
pub mod registry;
pub mod state;

pub use access::ThreadAccessPolicy;
pub use dispatcher::EventDispatcher;
pub use engine::{CaseWorkflow, WorkflowConfig};
pub use error::{Result, WorkflowError};
pub use events::{Actor, Attachment, InboundMessage, InteractionEvent, Reply};
pub use state::{CaseEvent, CaseState};
