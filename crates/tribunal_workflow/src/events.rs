//! Typed inbound events and the single-shot reply
//!
//! The ingest layer translates raw platform payloads into these shapes
//! before anything touches the engine. Every interactive event produces
//! exactly one [`Reply`], which the transport serializes into the one
//! allowed acknowledgment; engine code cannot acknowledge twice because
//! it never holds the transport.

use std::collections::HashMap;
use tribunal_core::{ChannelId, MessageId, RoleId, UserId};
use tribunal_gateway::wire::{ActionRow, InteractionResponse, Modal, ResponseData};

/// The account behind an event, with everything authorization needs.
#[derive(Clone, Debug)]
pub struct Actor {
    pub id: UserId,
    pub display_name: String,
    pub roles: Vec<RoleId>,
    /// Permission bitfield. Zero when the payload carried none, as on
    /// plain messages.
    pub permissions: u64,
    pub is_bot: bool,
}

impl Actor {
    pub fn mention(&self) -> String {
        self.id.mention()
    }
}

/// An interactive event: command, component or form submission.
#[derive(Clone, Debug)]
pub enum InteractionEvent {
    Command {
        name: String,
        actor: Actor,
        channel: ChannelId,
    },
    Component {
        custom_id: String,
        actor: Actor,
        channel: ChannelId,
        /// Selected user ids, for select components.
        values: Vec<UserId>,
    },
    ModalSubmit {
        custom_id: String,
        actor: Actor,
        channel: ChannelId,
        /// Submitted field values by field id, already trimmed.
        fields: HashMap<String, String>,
    },
}

impl InteractionEvent {
    pub fn actor(&self) -> &Actor {
        match self {
            InteractionEvent::Command { actor, .. }
            | InteractionEvent::Component { actor, .. }
            | InteractionEvent::ModalSubmit { actor, .. } => actor,
        }
    }
}

/// An attachment observed on a message.
#[derive(Clone, Debug)]
pub struct Attachment {
    pub url: String,
    pub filename: String,
}

/// A free-text message observed somewhere in the guild.
#[derive(Clone, Debug)]
pub struct InboundMessage {
    pub id: MessageId,
    pub channel: ChannelId,
    pub author: Actor,
    pub attachments: Vec<Attachment>,
}

/// The single acknowledgment of an interactive event.
#[derive(Clone, Debug)]
pub enum Reply {
    /// Private notice to the invoker, optionally with components.
    Ephemeral(ResponseData),
    /// Open a form for the invoker.
    Modal(Modal),
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Reply::Ephemeral(ResponseData {
            content: Some(content.into()),
            ..ResponseData::default()
        })
    }

    pub fn with_components(content: impl Into<String>, components: Vec<ActionRow>) -> Self {
        Reply::Ephemeral(ResponseData {
            content: Some(content.into()),
            components,
            ..ResponseData::default()
        })
    }

    pub fn modal(modal: Modal) -> Self {
        Reply::Modal(modal)
    }

    /// Serialize into the wire response the transport sends once.
    pub fn into_response(self) -> InteractionResponse {
        match self {
            Reply::Ephemeral(data) => InteractionResponse::ephemeral(data),
            Reply::Modal(modal) => InteractionResponse::modal(modal),
        }
    }
}
