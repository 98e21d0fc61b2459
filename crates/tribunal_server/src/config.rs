//! Startup configuration
//!
//! Every argument doubles as an environment variable, so deployments can
//! run on a plain `.env` file.

use clap::Parser;
use std::time::Duration;
use tribunal_core::{ChannelId, RoleId, StaffRoles};
use tribunal_sessions::SessionTtls;
use tribunal_workflow::messages::MessageStyle;
use tribunal_workflow::WorkflowConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "tribunal-server")]
#[command(about = "Dispute-review workflow service for a chat guild")]
#[command(version)]
pub struct Cli {
    /// Bot token for the platform REST API
    #[arg(long, env = "DISCORD_TOKEN")]
    pub token: String,

    /// Application id owning the slash command
    #[arg(long, env = "APPLICATION_ID")]
    pub application_id: String,

    /// Guild the service operates in
    #[arg(long, env = "GUILD_ID")]
    pub guild_id: String,

    /// Channel (forum or text) case surfaces are created under
    #[arg(long, env = "CASES_CHANNEL_ID")]
    pub cases_channel_id: String,

    /// Stewards role id
    #[arg(long, env = "STEWARDS_ROLE_ID")]
    pub stewards_role_id: String,

    /// Directors role id
    #[arg(long, env = "DIRECTORS_ROLE_ID")]
    pub directors_role_id: String,

    /// Channel receiving audit notes
    #[arg(long, env = "AUDIT_CHANNEL_ID")]
    pub audit_channel_id: Option<String>,

    /// Hex accent color for embeds, e.g. "5865F2"
    #[arg(long, env = "EMBED_COLOR")]
    pub embed_color: Option<String>,

    /// Respondent-pick window override, in seconds
    #[arg(long, env = "PICK_TTL_SECS")]
    pub pick_ttl_secs: Option<u64>,

    /// Attachment-capture window override, in seconds
    #[arg(long, env = "CAPTURE_TTL_SECS")]
    pub capture_ttl_secs: Option<u64>,

    /// Defense-form window override, in seconds
    #[arg(long, env = "DEFENSE_TTL_SECS")]
    pub defense_ttl_secs: Option<u64>,

    /// Server port
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,
}

impl Cli {
    pub fn workflow_config(&self) -> WorkflowConfig {
        let mut ttls = SessionTtls::default();
        if let Some(secs) = self.pick_ttl_secs {
            ttls.pick = Duration::from_secs(secs);
        }
        if let Some(secs) = self.capture_ttl_secs {
            ttls.capture = Duration::from_secs(secs);
        }
        if let Some(secs) = self.defense_ttl_secs {
            ttls.defense = Duration::from_secs(secs);
        }

        WorkflowConfig {
            cases_channel: ChannelId::new(self.cases_channel_id.as_str()),
            staff: StaffRoles::new(
                RoleId::new(self.stewards_role_id.as_str()),
                RoleId::new(self.directors_role_id.as_str()),
            ),
            audit_channel: self.audit_channel_id.as_deref().map(ChannelId::new),
            style: MessageStyle {
                accent_color: self.embed_color.as_deref().and_then(parse_color),
            },
            ttls,
        }
    }
}

/// Parse a hex accent color, with or without a leading '#'.
fn parse_color(value: &str) -> Option<u32> {
    u32::from_str_radix(value.trim().trim_start_matches('#'), 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_accepts_common_forms() {
        assert_eq!(parse_color("5865F2"), Some(0x5865F2));
        assert_eq!(parse_color("#5865F2"), Some(0x5865F2));
        assert_eq!(parse_color(" 00ff00 "), Some(0x00FF00));
        assert_eq!(parse_color("not-a-color"), None);
    }
}
