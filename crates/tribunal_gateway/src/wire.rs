//! Outbound payload shapes
//!
//! Thin serde mirrors of the platform's v10 REST shapes. Numeric
//! discriminators ("type", styles, flags) are set by the constructors so
//! call sites never touch raw numbers.

use serde::{Deserialize, Serialize};
use tribunal_core::{ChannelId, Label, LabelId, RoleId, UserId};

/// Interaction response: reply with a message in channel.
pub const RESPONSE_CHANNEL_MESSAGE: u8 = 4;
/// Interaction response: open a modal form.
pub const RESPONSE_MODAL: u8 = 9;

/// Message flag marking a reply visible to the invoker only.
pub const FLAG_EPHEMERAL: u64 = 1 << 6;

/// Channel type id of a forum parent.
pub const CHANNEL_GUILD_FORUM: u8 = 15;

/// The single guild slash command this service registers and handles.
pub const REVIEW_COMMAND: &str = "review";

const COMPONENT_ACTION_ROW: u8 = 1;
const COMPONENT_BUTTON: u8 = 2;
const COMPONENT_TEXT_INPUT: u8 = 4;
const COMPONENT_USER_SELECT: u8 = 5;

const BUTTON_PRIMARY: u8 = 1;
const BUTTON_SECONDARY: u8 = 2;
const BUTTON_SUCCESS: u8 = 3;
const BUTTON_DANGER: u8 = 4;

const TEXT_INPUT_SHORT: u8 = 1;
const TEXT_INPUT_PARAGRAPH: u8 = 2;

/// A platform account. Returned by user lookups and embedded in inbound
/// payloads.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// Preferred display name: global name when set, username otherwise.
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct EmbedAuthor {
    pub name: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A rich-content block attached to a message.
#[derive(Serialize, Clone, Debug, Default)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author_name(mut self, name: impl Into<String>) -> Self {
        self.author = Some(EmbedAuthor { name: name.into() });
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: Option<u32>) -> Self {
        self.color = color;
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter { text: text.into() });
        self
    }

    /// Stamp the embed with the current time.
    pub fn timestamp_now(mut self) -> Self {
        self.timestamp = Some(chrono::Utc::now().to_rfc3339());
        self
    }
}

/// A clickable button.
#[derive(Serialize, Clone, Debug)]
pub struct Button {
    #[serde(rename = "type")]
    kind: u8,
    style: u8,
    pub custom_id: String,
    pub label: String,
}

impl Button {
    fn styled(style: u8, custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: COMPONENT_BUTTON,
            style,
            custom_id: custom_id.into(),
            label: label.into(),
        }
    }

    pub fn primary(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::styled(BUTTON_PRIMARY, custom_id, label)
    }

    pub fn secondary(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::styled(BUTTON_SECONDARY, custom_id, label)
    }

    pub fn success(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::styled(BUTTON_SUCCESS, custom_id, label)
    }

    pub fn danger(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::styled(BUTTON_DANGER, custom_id, label)
    }
}

/// A member picker.
#[derive(Serialize, Clone, Debug)]
pub struct UserSelect {
    #[serde(rename = "type")]
    kind: u8,
    pub custom_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl UserSelect {
    pub fn new(custom_id: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            kind: COMPONENT_USER_SELECT,
            custom_id: custom_id.into(),
            placeholder: Some(placeholder.into()),
        }
    }
}

/// A single-line or paragraph form field.
#[derive(Serialize, Clone, Debug)]
pub struct TextInput {
    #[serde(rename = "type")]
    kind: u8,
    style: u8,
    pub custom_id: String,
    pub label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

impl TextInput {
    fn styled(style: u8, custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: COMPONENT_TEXT_INPUT,
            style,
            custom_id: custom_id.into(),
            label: label.into(),
            required: true,
            placeholder: None,
            max_length: None,
        }
    }

    pub fn short(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::styled(TEXT_INPUT_SHORT, custom_id, label)
    }

    pub fn paragraph(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::styled(TEXT_INPUT_PARAGRAPH, custom_id, label)
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

/// Any interactive element an action row can hold.
#[derive(Serialize, Clone, Debug)]
#[serde(untagged)]
pub enum Component {
    Button(Button),
    UserSelect(UserSelect),
    TextInput(TextInput),
}

/// A horizontal row of components.
#[derive(Serialize, Clone, Debug)]
pub struct ActionRow {
    #[serde(rename = "type")]
    kind: u8,
    pub components: Vec<Component>,
}

impl ActionRow {
    fn of(components: Vec<Component>) -> Self {
        Self {
            kind: COMPONENT_ACTION_ROW,
            components,
        }
    }

    pub fn buttons(buttons: Vec<Button>) -> Self {
        Self::of(buttons.into_iter().map(Component::Button).collect())
    }

    pub fn user_select(select: UserSelect) -> Self {
        Self::of(vec![Component::UserSelect(select)])
    }

    pub fn text_input(input: TextInput) -> Self {
        Self::of(vec![Component::TextInput(input)])
    }
}

/// Mention allow-list. `parse` stays empty so only the listed ids can ping.
#[derive(Serialize, Clone, Debug, Default)]
pub struct AllowedMentions {
    pub parse: Vec<String>,
    pub users: Vec<String>,
    pub roles: Vec<String>,
}

impl AllowedMentions {
    /// Nothing pings, even when the content mentions someone.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn users(mut self, users: &[&UserId]) -> Self {
        self.users = users.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn roles(mut self, roles: &[&RoleId]) -> Self {
        self.roles = roles.iter().map(|id| id.to_string()).collect();
        self
    }
}

/// A message posted to a channel, surface or DM.
#[derive(Serialize, Clone, Debug, Default)]
pub struct OutboundMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
}

impl OutboundMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn components(mut self, rows: Vec<ActionRow>) -> Self {
        self.components = rows;
        self
    }

    pub fn allowed_mentions(mut self, allowed: AllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed);
        self
    }
}

/// Request to open a discussion surface under a parent channel.
#[derive(Clone, Debug)]
pub struct CreateSurface {
    /// Surface name, already bounded by the caller.
    pub name: String,
    /// The opening message.
    pub message: OutboundMessage,
    /// Category label to apply when the parent supports labels.
    pub label: Option<LabelId>,
}

/// A discussion surface that was just created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedSurface {
    pub id: ChannelId,
    pub url: String,
}

/// Subset of a channel object the workflow cares about.
#[derive(Deserialize, Clone, Debug)]
pub struct ChannelInfo {
    pub id: ChannelId,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub parent_id: Option<ChannelId>,
    #[serde(default)]
    pub available_tags: Vec<Label>,
}

impl ChannelInfo {
    pub fn is_forum(&self) -> bool {
        self.kind == CHANNEL_GUILD_FORUM
    }
}

/// A modal form.
#[derive(Serialize, Clone, Debug)]
pub struct Modal {
    pub custom_id: String,
    pub title: String,
    pub components: Vec<ActionRow>,
}

impl Modal {
    pub fn new(custom_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            title: title.into(),
            components: Vec::new(),
        }
    }

    pub fn field(mut self, input: TextInput) -> Self {
        self.components.push(ActionRow::text_input(input));
        self
    }
}

/// Body of a message-style interaction response.
#[derive(Serialize, Clone, Debug, Default)]
pub struct ResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(untagged)]
pub enum CallbackData {
    Message(ResponseData),
    Modal(Modal),
}

/// The single response sent back for an interaction.
#[derive(Serialize, Clone, Debug)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    kind: u8,
    data: CallbackData,
}

impl InteractionResponse {
    /// Reply visible only to the invoker.
    pub fn ephemeral(mut data: ResponseData) -> Self {
        data.flags = Some(data.flags.unwrap_or(0) | FLAG_EPHEMERAL);
        Self {
            kind: RESPONSE_CHANNEL_MESSAGE,
            data: CallbackData::Message(data),
        }
    }

    /// Open a modal form for the invoker.
    pub fn modal(modal: Modal) -> Self {
        Self {
            kind: RESPONSE_MODAL,
            data: CallbackData::Modal(modal),
        }
    }
}
