//! User-facing content builders
//!
//! Custom ids, forms, embeds and notices in one place, so the engine
//! reads as workflow steps and the wording stays consistent. Custom ids
//! carry their scope after a colon ("case_defense:42", "case_defense:any").

use crate::events::{Actor, Attachment, Reply};
use std::time::Duration;
use tribunal_core::{
    DefenseFields, EvidenceKind, RequestFields, RoleId, UserId, Verdict, VerdictFields,
};
use tribunal_gateway::wire::{
    ActionRow, AllowedMentions, Button, Embed, Modal, OutboundMessage, TextInput, UserSelect,
};

pub const PICK_RESPONDENT: &str = "case_pick";
pub const REQUEST_FORM: &str = "case_request_form";
pub const DEFENSE_FORM: &str = "case_defense_form";
pub const PANEL: &str = "case_panel";
pub const ATTACH_RULING: &str = "case_attach_ruling";
pub const DEFENSE_PREFIX: &str = "case_defense";
pub const ATTACH_REQUEST_PREFIX: &str = "case_attach_request";
pub const ATTACH_DEFENSE_PREFIX: &str = "case_attach_defense";
pub const VERDICT_PREFIX: &str = "case_verdict";
pub const VERDICT_FORM_PREFIX: &str = "case_verdict_form";
/// Scope marking a defense button usable by whoever answers the case.
pub const DEFENSE_ANY: &str = "any";
/// Display stand-in for a respondent the platform could not resolve.
pub const UNKNOWN_RESPONDENT: &str = "Unknown";

pub const FIELD_VIDEO_LINK: &str = "video_link";
pub const FIELD_DAMAGE_TYPE: &str = "damage_type";
pub const FIELD_ARGUMENT: &str = "argument";
pub const FIELD_REGULATION: &str = "regulation";
pub const FIELD_SANCTION: &str = "sanction";
pub const FIELD_RATIONALE: &str = "rationale";

/// Visual defaults applied to workflow messages.
#[derive(Clone, Copy, Debug, Default)]
pub struct MessageStyle {
    /// Accent color applied to embeds when configured.
    pub accent_color: Option<u32>,
}

pub fn defense_button_id(respondent: Option<&UserId>) -> String {
    match respondent {
        Some(id) => format!("{}:{}", DEFENSE_PREFIX, id),
        None => format!("{}:{}", DEFENSE_PREFIX, DEFENSE_ANY),
    }
}

pub fn attach_request_id(requester: &UserId) -> String {
    format!("{}:{}", ATTACH_REQUEST_PREFIX, requester)
}

pub fn attach_defense_id(respondent: &UserId) -> String {
    format!("{}:{}", ATTACH_DEFENSE_PREFIX, respondent)
}

pub fn verdict_button_id(verdict: Verdict) -> String {
    format!("{}:{}", VERDICT_PREFIX, verdict.token())
}

pub fn verdict_form_id(verdict: Verdict) -> String {
    format!("{}:{}", VERDICT_FORM_PREFIX, verdict.token())
}

/// Prompt shown right after `/review`: who is the case against?
pub fn respondent_prompt() -> Reply {
    let select = UserSelect::new(PICK_RESPONDENT, "Select the member this case is against");
    Reply::with_components(
        "Opening a review case. Who is it against?",
        vec![ActionRow::user_select(select)],
    )
}

/// The request form.
pub fn request_modal() -> Modal {
    Modal::new(REQUEST_FORM, "Open a review case")
        .field(
            TextInput::short(FIELD_VIDEO_LINK, "Video link (optional)")
                .optional()
                .placeholder("https://..."),
        )
        .field(TextInput::short(FIELD_DAMAGE_TYPE, "Damage type").max_length(100))
        .field(TextInput::paragraph(FIELD_ARGUMENT, "Your argument").max_length(1000))
}

/// The defense form.
pub fn defense_modal() -> Modal {
    Modal::new(DEFENSE_FORM, "Submit your defense")
        .field(
            TextInput::short(FIELD_VIDEO_LINK, "Video link (optional)")
                .optional()
                .placeholder("https://..."),
        )
        .field(TextInput::paragraph(FIELD_ARGUMENT, "Your argument").max_length(1000))
}

/// The ruling form for one verdict.
pub fn verdict_modal(verdict: Verdict) -> Modal {
    Modal::new(verdict_form_id(verdict), format!("Ruling: {}", verdict.title()))
        .field(TextInput::short(FIELD_REGULATION, "Regulation article").max_length(100))
        .field(TextInput::short(FIELD_SANCTION, "Sanction").max_length(100))
        .field(TextInput::paragraph(FIELD_RATIONALE, "Rationale").max_length(1000))
}

/// The opening message of a case surface: a mention line restricted to
/// the respondent and the panel roles, the structured summary, and the
/// standing action buttons. An unresolved respondent shows by placeholder
/// name and the defense button stays open to whoever answers the case.
pub fn opening_message(
    style: &MessageStyle,
    requester: &Actor,
    respondent: Option<&UserId>,
    fields: &RequestFields,
    stewards: &RoleId,
    directors: &RoleId,
) -> OutboundMessage {
    let video = fields
        .video_link
        .clone()
        .unwrap_or_else(|| "No link provided, awaiting attachment".to_string());
    let named = match respondent {
        Some(id) => id.mention(),
        None => UNKNOWN_RESPONDENT.to_string(),
    };

    let embed = Embed::new()
        .title("Review Request")
        .color(style.accent_color)
        .field("Requester", requester.mention())
        .field("Respondent", named)
        .field("Damage type", &fields.damage_type)
        .field("Video", video)
        .field("Argument", &fields.argument)
        .footer("Status: Under review")
        .timestamp_now();

    let buttons = vec![
        Button::primary(defense_button_id(respondent), "Submit defense"),
        Button::secondary(
            attach_request_id(&requester.id),
            "Attach request video",
        ),
        Button::secondary(PANEL, "Stewards panel"),
    ];

    let mut mentions = Vec::new();
    if let Some(id) = respondent {
        mentions.push(id.mention());
    }
    mentions.push(stewards.mention());
    mentions.push(directors.mention());

    let mut allowed = AllowedMentions::none().roles(&[stewards, directors]);
    if let Some(id) = respondent {
        allowed = allowed.users(&[id]);
    }

    OutboundMessage::new()
        .content(mentions.join(" "))
        .embed(embed)
        .components(vec![ActionRow::buttons(buttons)])
        .allowed_mentions(allowed)
}

/// Follow-up posted into the surface when the request came without a link.
pub fn missing_link_prompt(requester: &Actor) -> OutboundMessage {
    OutboundMessage::text(format!(
        "{} no video link was provided. Attach the footage here, or use the capture button.",
        requester.mention()
    ))
    .components(vec![ActionRow::buttons(vec![Button::secondary(
        attach_request_id(&requester.id),
        "Attach request video",
    )])])
    .allowed_mentions(AllowedMentions::none().users(&[&requester.id]))
}

/// Private notice confirming a capture window is open.
pub fn capture_window_notice(evidence: EvidenceKind, window: Duration) -> String {
    let minutes = (window.as_secs() / 60).max(1);
    format!(
        "Capture window open for {} evidence: your next message with attachments in this surface will be recorded. You have {} minute(s).",
        evidence.noun(),
        minutes
    )
}

/// Summary posted when a capture window catches an attachment-bearing
/// message.
pub fn evidence_message(
    style: &MessageStyle,
    evidence: EvidenceKind,
    author: &Actor,
    attachments: &[Attachment],
) -> OutboundMessage {
    let links = attachments
        .iter()
        .map(|attachment| format!("[{}]({})", attachment.filename, attachment.url))
        .collect::<Vec<_>>()
        .join("\n");

    let embed = Embed::new()
        .title(format!("Evidence attached ({})", evidence.noun()))
        .color(style.accent_color)
        .description(links)
        .footer(format!("Submitted by {}", author.display_name))
        .timestamp_now();

    OutboundMessage::new().embed(embed)
}

/// The defense summary. Carries a capture button when no link was given.
pub fn defense_message(
    style: &MessageStyle,
    author: &Actor,
    fields: &DefenseFields,
) -> OutboundMessage {
    let video = fields
        .video_link
        .clone()
        .unwrap_or_else(|| "No link provided, awaiting attachment".to_string());

    let embed = Embed::new()
        .title("Respondent's Defense")
        .color(style.accent_color)
        .field("Respondent", author.mention())
        .field("Video", video)
        .field("Argument", &fields.argument)
        .timestamp_now();

    let mut message = OutboundMessage::new()
        .embed(embed)
        .allowed_mentions(AllowedMentions::none());
    if fields.video_link.is_none() {
        message = message.components(vec![ActionRow::buttons(vec![Button::secondary(
            attach_defense_id(&author.id),
            "Attach defense video",
        )])]);
    }
    message
}

/// The ruling summary. Attributed to the reviewing body, never to the
/// steward who filed it; a capture affordance stays available afterwards.
pub fn verdict_message(
    style: &MessageStyle,
    verdict: Verdict,
    fields: &VerdictFields,
) -> OutboundMessage {
    let embed = Embed::new()
        .author_name("Stewards Panel")
        .title(format!("Ruling: {}", verdict.title()))
        .color(style.accent_color)
        .field("Regulation", &fields.regulation)
        .field("Sanction", &fields.sanction)
        .field("Rationale", &fields.rationale)
        .timestamp_now();

    OutboundMessage::new()
        .embed(embed)
        .components(vec![ActionRow::buttons(vec![Button::secondary(
            ATTACH_RULING,
            "Attach ruling evidence",
        )])])
        .allowed_mentions(AllowedMentions::none())
}

/// The staff console shown by the panel button.
pub fn panel_reply() -> Reply {
    let verdicts = ActionRow::buttons(vec![
        Button::success(verdict_button_id(Verdict::Upheld), "Upheld"),
        Button::danger(verdict_button_id(Verdict::Rejected), "Rejected"),
        Button::secondary(verdict_button_id(Verdict::Dismissed), "Dismissed"),
    ]);
    let capture = ActionRow::buttons(vec![Button::primary(
        ATTACH_RULING,
        "Attach ruling evidence",
    )]);
    Reply::with_components("Stewards panel: record a ruling or capture evidence.", vec![verdicts, capture])
}

/// Private heads-up to the respondent when a case opens against them.
pub fn respondent_dm(requester_name: &str, url: &str) -> OutboundMessage {
    OutboundMessage::text(format!(
        "You have been named in a review case by {}. Follow it here: {}",
        requester_name, url
    ))
}

/// Audit-channel note for a new case.
pub fn audit_new_case(requester_name: &str, respondent_name: &str, url: &str) -> OutboundMessage {
    OutboundMessage::text(format!(
        "New review case: {} vs {} at {}",
        requester_name, respondent_name, url
    ))
    .allowed_mentions(AllowedMentions::none())
}

/// Audit-channel note for a recorded ruling, with the steward named.
pub fn audit_verdict(verdict: Verdict, steward_name: &str, url: &str) -> OutboundMessage {
    OutboundMessage::text(format!(
        "Ruling {} recorded by {} at {}",
        verdict.title(),
        steward_name,
        url
    ))
    .allowed_mentions(AllowedMentions::none())
}
