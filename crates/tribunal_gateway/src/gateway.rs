//! Gateway trait

use crate::error::Result;
use crate::wire::{CreateSurface, CreatedSurface, OutboundMessage, User};
use async_trait::async_trait;
use tribunal_core::{ChannelId, Label, LabelId, MessageId, UserId};

/// Everything the workflow engine needs from the chat platform.
///
/// The engine never touches the REST layer directly; tests substitute
/// recording implementations.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Open a discussion surface under `parent` with an opening message.
    /// Applies the category label when the parent supports labels.
    async fn create_discussion_surface(
        &self,
        parent: &ChannelId,
        request: CreateSurface,
    ) -> Result<CreatedSurface>;

    /// Post a message to a channel or surface.
    async fn send_message(
        &self,
        channel: &ChannelId,
        message: OutboundMessage,
    ) -> Result<MessageId>;

    /// Replace the category label applied to a surface.
    async fn edit_surface_label(&self, surface: &ChannelId, label: &LabelId) -> Result<()>;

    /// Look up an account.
    async fn fetch_user(&self, user: &UserId) -> Result<User>;

    /// Open a private channel to a user and deliver a message.
    async fn send_direct_message(&self, user: &UserId, message: OutboundMessage) -> Result<()>;

    /// Remove a posted message.
    async fn delete_message(&self, channel: &ChannelId, message: &MessageId) -> Result<()>;

    /// Category labels offered by a parent channel. Empty when the parent
    /// has none.
    async fn list_labels(&self, parent: &ChannelId) -> Result<Vec<Label>>;
}
