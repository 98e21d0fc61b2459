//! Inbound payload shapes
//!
//! Serde mirrors of the interaction and message payloads the platform
//! delivers to the ingest surface. Fields the workflow never reads are
//! left out; serde ignores them.

use crate::wire::User;
use serde::Deserialize;

/// Interaction type: a slash command invocation.
pub const INTERACTION_COMMAND: u8 = 2;
/// Interaction type: a component (button, select) interaction.
pub const INTERACTION_COMPONENT: u8 = 3;
/// Interaction type: a modal form submission.
pub const INTERACTION_MODAL_SUBMIT: u8 = 5;

/// A guild member as attached to interactions and messages.
#[derive(Deserialize, Clone, Debug)]
pub struct MemberPayload {
    pub user: User,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Computed permission bitfield as a decimal string. Present on
    /// interaction members, absent on message members.
    #[serde(default)]
    pub permissions: Option<String>,
}

impl MemberPayload {
    /// Server nickname, falling back to the account's display name.
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or_else(|| self.user.display_name())
    }
}

/// Channel context attached to an interaction.
#[derive(Deserialize, Clone, Debug)]
pub struct ChannelPayload {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// A value submitted through one modal field.
#[derive(Deserialize, Clone, Debug)]
pub struct ModalFieldPayload {
    pub custom_id: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// One action row of a submitted modal.
#[derive(Deserialize, Clone, Debug)]
pub struct ModalRowPayload {
    #[serde(default)]
    pub components: Vec<ModalFieldPayload>,
}

/// The `data` object of an interaction.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct InteractionData {
    /// Command name, for command interactions.
    #[serde(default)]
    pub name: Option<String>,
    /// Component or modal custom id.
    #[serde(default)]
    pub custom_id: Option<String>,
    /// Selected values of a select component.
    #[serde(default)]
    pub values: Vec<String>,
    /// Submitted rows of a modal.
    #[serde(default)]
    pub components: Vec<ModalRowPayload>,
}

/// An interaction delivered by the platform.
#[derive(Deserialize, Clone, Debug)]
pub struct InteractionPayload {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub token: String,
    #[serde(default)]
    pub data: Option<InteractionData>,
    #[serde(default)]
    pub member: Option<MemberPayload>,
    /// Set instead of `member` outside a guild.
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub channel: Option<ChannelPayload>,
    #[serde(default)]
    pub channel_id: Option<String>,
}

impl InteractionPayload {
    /// The account behind the interaction, wherever the platform put it.
    pub fn actor(&self) -> Option<&User> {
        self.member
            .as_ref()
            .map(|member| &member.user)
            .or(self.user.as_ref())
    }

    /// Channel the interaction was invoked in.
    pub fn channel_id(&self) -> Option<&str> {
        self.channel
            .as_ref()
            .map(|channel| channel.id.as_str())
            .or(self.channel_id.as_deref())
    }

    /// Value of a submitted modal field, trimmed.
    pub fn field_value(&self, custom_id: &str) -> Option<String> {
        let data = self.data.as_ref()?;
        for row in &data.components {
            for field in &row.components {
                if field.custom_id == custom_id {
                    return field.value.as_ref().map(|value| value.trim().to_string());
                }
            }
        }
        None
    }
}

/// An attachment on a message.
#[derive(Deserialize, Clone, Debug)]
pub struct AttachmentPayload {
    pub id: String,
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// A message-create payload.
#[derive(Deserialize, Clone, Debug)]
pub struct MessagePayload {
    pub id: String,
    pub channel_id: String,
    pub author: User,
    #[serde(default)]
    pub member: Option<MemberPayload>,
    #[serde(default)]
    pub attachments: Vec<AttachmentPayload>,
}

impl MessagePayload {
    /// Role ids of the author, when the member object was attached.
    pub fn author_roles(&self) -> Vec<String> {
        self.member
            .as_ref()
            .map(|member| member.roles.clone())
            .unwrap_or_default()
    }
}
