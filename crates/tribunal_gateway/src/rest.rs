//! REST implementation of the gateway

use crate::error::{GatewayError, Result};
use crate::gateway::Gateway;
use crate::wire::{
    ChannelInfo, CreateSurface, CreatedSurface, OutboundMessage, User, REVIEW_COMMAND,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;
use tribunal_core::{ChannelId, Label, LabelId, MessageId, UserId};

const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

#[derive(Deserialize)]
struct ChannelRef {
    id: ChannelId,
}

#[derive(Deserialize)]
struct MessageRef {
    id: MessageId,
}

/// Gateway over the platform's v10 REST API.
pub struct RestGateway {
    client: Client,
    base_url: String,
    auth: String,
    guild_id: String,
}

impl RestGateway {
    pub fn new(token: impl Into<String>, guild_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_API_BASE.to_string(),
            auth: format!("Bot {}", token.into()),
            guild_id: guild_id.into(),
        }
    }

    /// Point the gateway at a different API root.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Register the guild slash command set. Idempotent on the platform
    /// side; meant to run once at startup.
    pub async fn register_guild_commands(&self, application_id: &str) -> Result<()> {
        let url = format!(
            "{}/applications/{}/guilds/{}/commands",
            self.base_url, application_id, self.guild_id
        );
        let body = serde_json::json!([{
            "name": REVIEW_COMMAND,
            "description": "Open a review case against another member",
        }]);
        let response = self
            .client
            .put(url)
            .header("Authorization", &self.auth)
            .json(&body)
            .send()
            .await?;
        check(response).await?;
        debug!("registered guild commands for application {}", application_id);
        Ok(())
    }

    fn surface_url(&self, surface: &ChannelId) -> String {
        format!("https://discord.com/channels/{}/{}", self.guild_id, surface)
    }

    async fn fetch_channel(&self, channel: &ChannelId) -> Result<ChannelInfo> {
        let url = format!("{}/channels/{}", self.base_url, channel);
        let response = self
            .client
            .get(url)
            .header("Authorization", &self.auth)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn post_message(
        &self,
        channel: &ChannelId,
        message: &OutboundMessage,
    ) -> Result<MessageId> {
        let url = format!("{}/channels/{}/messages", self.base_url, channel);
        let response = self
            .client
            .post(url)
            .header("Authorization", &self.auth)
            .json(message)
            .send()
            .await?;
        let posted: MessageRef = check(response).await?.json().await?;
        Ok(posted.id)
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(GatewayError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl Gateway for RestGateway {
    async fn create_discussion_surface(
        &self,
        parent: &ChannelId,
        request: CreateSurface,
    ) -> Result<CreatedSurface> {
        let parent_info = self.fetch_channel(parent).await?;

        let surface = if parent_info.is_forum() {
            // Forum parents take the opening message inline and accept
            // category labels at creation time.
            let mut body = serde_json::json!({
                "name": request.name,
                "message": serde_json::to_value(&request.message)?,
            });
            if let Some(label) = &request.label {
                body["applied_tags"] = serde_json::json!([label]);
            }
            let url = format!("{}/channels/{}/threads", self.base_url, parent);
            let response = self
                .client
                .post(url)
                .header("Authorization", &self.auth)
                .json(&body)
                .send()
                .await?;
            let created: ChannelRef = check(response).await?.json().await?;
            created.id
        } else {
            // Plain channels get the opening message first and a thread
            // spawned from it. No labels on this path.
            let opening = self.post_message(parent, &request.message).await?;
            let url = format!(
                "{}/channels/{}/messages/{}/threads",
                self.base_url, parent, opening
            );
            let response = self
                .client
                .post(url)
                .header("Authorization", &self.auth)
                .json(&serde_json::json!({ "name": request.name }))
                .send()
                .await?;
            let created: ChannelRef = check(response).await?.json().await?;
            created.id
        };

        debug!("created discussion surface {} under {}", surface, parent);
        Ok(CreatedSurface {
            url: self.surface_url(&surface),
            id: surface,
        })
    }

    async fn send_message(
        &self,
        channel: &ChannelId,
        message: OutboundMessage,
    ) -> Result<MessageId> {
        self.post_message(channel, &message).await
    }

    async fn edit_surface_label(&self, surface: &ChannelId, label: &LabelId) -> Result<()> {
        let url = format!("{}/channels/{}", self.base_url, surface);
        let response = self
            .client
            .patch(url)
            .header("Authorization", &self.auth)
            .json(&serde_json::json!({ "applied_tags": [label] }))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn fetch_user(&self, user: &UserId) -> Result<User> {
        let url = format!("{}/users/{}", self.base_url, user);
        let response = self
            .client
            .get(url)
            .header("Authorization", &self.auth)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn send_direct_message(&self, user: &UserId, message: OutboundMessage) -> Result<()> {
        let url = format!("{}/users/@me/channels", self.base_url);
        let response = self
            .client
            .post(url)
            .header("Authorization", &self.auth)
            .json(&serde_json::json!({ "recipient_id": user }))
            .send()
            .await?;
        let dm: ChannelRef = check(response).await?.json().await?;
        self.post_message(&dm.id, &message).await?;
        Ok(())
    }

    async fn delete_message(&self, channel: &ChannelId, message: &MessageId) -> Result<()> {
        let url = format!(
            "{}/channels/{}/messages/{}",
            self.base_url, channel, message
        );
        let response = self
            .client
            .delete(url)
            .header("Authorization", &self.auth)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn list_labels(&self, parent: &ChannelId) -> Result<Vec<Label>> {
        Ok(self.fetch_channel(parent).await?.available_tags)
    }
}
