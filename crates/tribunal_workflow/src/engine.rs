//! Case workflow engine
//!
//! One method per workflow operation. Every interactive operation returns
//! exactly one [`Reply`]; posting into surfaces, labeling, DMs and audit
//! notes go through the [`Gateway`]. The engine owns the access policy and
//! the case registry, and shares the session store with the host.

use crate::access::ThreadAccessPolicy;
use crate::error::{Result, WorkflowError};
use crate::events::{Actor, Attachment, InboundMessage, Reply};
use crate::messages::{self, MessageStyle};
use crate::registry::{CaseRecord, CaseRegistry};
use crate::state::{CaseEvent, CaseState};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tribunal_core::{
    case_surface_name, find_label, is_video_link, normalized_link, ChannelId, DefenseFields,
    EvidenceKind, LabelId, RequestFields, StaffRoles, UserId, Verdict, VerdictFields,
    UNDER_REVIEW_SYNONYMS,
};
use tribunal_gateway::wire::{CreateSurface, OutboundMessage};
use tribunal_gateway::Gateway;
use tribunal_sessions::{SessionKind, SessionPayload, SessionStore, SessionTtls};

/// Engine configuration, resolved once at startup.
#[derive(Clone, Debug)]
pub struct WorkflowConfig {
    /// Parent channel case surfaces are created under.
    pub cases_channel: ChannelId,
    /// The trusted panel roles.
    pub staff: StaffRoles,
    /// Channel receiving audit notes, when configured.
    pub audit_channel: Option<ChannelId>,
    /// Visual defaults for workflow messages.
    pub style: MessageStyle,
    /// Session TTL policy.
    pub ttls: SessionTtls,
}

/// The dispute-review workflow.
pub struct CaseWorkflow {
    gateway: Arc<dyn Gateway>,
    sessions: Arc<SessionStore>,
    access: ThreadAccessPolicy,
    registry: CaseRegistry,
    config: WorkflowConfig,
}

/// Hook deciding which attachments count as evidence. Accepts everything
/// today; narrowing to video content types would happen here.
fn is_evidence_attachment(_attachment: &Attachment) -> bool {
    true
}

/// Log-and-drop for side effects that must not fail the operation.
fn best_effort<T, E: std::fmt::Display>(context: &str, result: std::result::Result<T, E>) {
    if let Err(error) = result {
        debug!("best-effort {} failed: {}", context, error);
    }
}

fn required_field(fields: &HashMap<String, String>, key: &str, label: &str) -> Result<String> {
    fields
        .get(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| WorkflowError::Validation(format!("The {} field is required.", label)))
}

/// Optional video link: absent is fine, present must look like http(s).
fn optional_link(fields: &HashMap<String, String>) -> Result<Option<String>> {
    match fields
        .get(messages::FIELD_VIDEO_LINK)
        .and_then(|value| normalized_link(value))
    {
        Some(link) if !is_video_link(&link) => Err(WorkflowError::Validation(
            "The video link must be a valid http(s) URL.".to_string(),
        )),
        other => Ok(other),
    }
}

impl CaseWorkflow {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        sessions: Arc<SessionStore>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            gateway,
            sessions,
            access: ThreadAccessPolicy::new(),
            registry: CaseRegistry::new(),
            config,
        }
    }

    /// Read access to a live case record, mainly for tests and diagnostics.
    pub async fn case(&self, surface: &ChannelId) -> Option<CaseRecord> {
        self.registry.get(surface).await
    }

    fn is_staff(&self, actor: &Actor) -> bool {
        self.config.staff.is_staff(&actor.roles, actor.permissions)
    }

    async fn case_for(&self, surface: &ChannelId) -> Result<CaseRecord> {
        self.registry.get(surface).await.ok_or_else(|| {
            WorkflowError::UnknownSurface(
                "This action only works inside an active case surface.".to_string(),
            )
        })
    }

    /// The slash command: start a case setup and ask for the respondent.
    pub async fn open_case(&self, actor: &Actor) -> Result<Reply> {
        self.sessions
            .put(
                actor.id.clone(),
                SessionPayload::Pick { respondent: None },
                self.config.ttls.pick,
            )
            .await;
        info!("case setup started by {}", actor.id);
        Ok(messages::respondent_prompt())
    }

    /// Respondent picked from the member select. Overwriting the pick
    /// restarts its window, so re-picking is harmless.
    pub async fn choose_respondent(&self, actor: &Actor, values: &[UserId]) -> Result<Reply> {
        if self
            .sessions
            .peek(&actor.id, SessionKind::Pick)
            .await
            .is_none()
        {
            return Err(WorkflowError::SessionExpired(
                "This case setup has expired. Run /review again.".to_string(),
            ));
        }
        let Some(selected) = values.first() else {
            return Err(WorkflowError::Validation(
                "Select a member to continue.".to_string(),
            ));
        };
        self.sessions
            .put(
                actor.id.clone(),
                SessionPayload::Pick {
                    respondent: Some(selected.clone()),
                },
                self.config.ttls.pick,
            )
            .await;
        Ok(Reply::modal(messages::request_modal()))
    }

    /// The request form came back: validate, create the case surface, wire
    /// up the record and the allow-list, and notify everyone involved.
    pub async fn submit_request(
        &self,
        actor: &Actor,
        fields: &HashMap<String, String>,
    ) -> Result<Reply> {
        let Some(SessionPayload::Pick { respondent }) =
            self.sessions.peek(&actor.id, SessionKind::Pick).await
        else {
            return Err(WorkflowError::SessionExpired(
                "This case setup has expired. Run /review again.".to_string(),
            ));
        };
        let Some(picked) = respondent else {
            return Err(WorkflowError::Validation(
                "Select the respondent before submitting the case.".to_string(),
            ));
        };

        let request = RequestFields {
            video_link: optional_link(fields)?,
            damage_type: required_field(fields, messages::FIELD_DAMAGE_TYPE, "damage type")?,
            argument: required_field(fields, messages::FIELD_ARGUMENT, "argument")?,
        };

        // The pick can go stale before submission (member left, deleted
        // account). The case still opens, with the respondent unbound and
        // the defense button open to whoever answers it.
        let respondent_user = match self.gateway.fetch_user(&picked).await {
            Ok(user) => Some(user),
            Err(error) => {
                debug!("respondent lookup failed for {}: {}", picked, error);
                None
            }
        };
        let respondent = respondent_user.is_some().then(|| picked.clone());
        let respondent_name = respondent_user
            .as_ref()
            .map_or(messages::UNKNOWN_RESPONDENT, |user| user.display_name());

        let name = case_surface_name(&actor.display_name, respondent_name);
        let label = self.under_review_label().await;
        let opening = messages::opening_message(
            &self.config.style,
            actor,
            respondent.as_ref(),
            &request,
            &self.config.staff.stewards,
            &self.config.staff.directors,
        );
        let created = self
            .gateway
            .create_discussion_surface(
                &self.config.cases_channel,
                CreateSurface {
                    name,
                    message: opening,
                    label,
                },
            )
            .await?;

        // The surface exists now. Consume the pick so a stale resubmission
        // cannot mint a second one.
        self.sessions.take(&actor.id, SessionKind::Pick).await;

        self.registry
            .register(
                created.id.clone(),
                CaseRecord {
                    requester: actor.id.clone(),
                    respondent: respondent.clone(),
                    state: CaseState::UnderReview,
                    parent: self.config.cases_channel.clone(),
                },
            )
            .await?;
        let mut identities = vec![actor.id.clone()];
        if let Some(respondent) = &respondent {
            identities.push(respondent.clone());
        }
        self.access
            .register(
                created.id.clone(),
                identities,
                vec![
                    self.config.staff.stewards.clone(),
                    self.config.staff.directors.clone(),
                ],
            )
            .await;

        if request.video_link.is_none() {
            self.gateway
                .send_message(&created.id, messages::missing_link_prompt(actor))
                .await?;
        }

        if let Some(respondent) = &respondent {
            best_effort(
                "respondent notification",
                self.gateway
                    .send_direct_message(
                        respondent,
                        messages::respondent_dm(&actor.display_name, &created.url),
                    )
                    .await,
            );
        }
        if let Some(audit) = &self.config.audit_channel {
            best_effort(
                "audit post",
                self.gateway
                    .send_message(
                        audit,
                        messages::audit_new_case(
                            &actor.display_name,
                            respondent_name,
                            &created.url,
                        ),
                    )
                    .await,
            );
        }

        info!(
            "case surface {} opened by {} against {}",
            created.id, actor.id, picked
        );
        Ok(Reply::text(format!("Case opened: {}", created.url)))
    }

    /// Open an attachment-capture window inside a case surface.
    pub async fn open_capture(
        &self,
        actor: &Actor,
        surface: &ChannelId,
        evidence: EvidenceKind,
    ) -> Result<Reply> {
        let record = self.case_for(surface).await?;
        let staff = self.is_staff(actor);
        let permitted = match evidence {
            EvidenceKind::Request => staff || record.requester == actor.id,
            EvidenceKind::Defense => staff || record.respondent.as_ref() == Some(&actor.id),
            EvidenceKind::Verdict => staff,
        };
        if !permitted {
            return Err(WorkflowError::AccessDenied(format!(
                "You cannot attach {} evidence on this case.",
                evidence.noun()
            )));
        }

        let ttl = self.config.ttls.capture;
        self.sessions
            .put(
                actor.id.clone(),
                SessionPayload::Capture {
                    evidence,
                    surface: surface.clone(),
                },
                ttl,
            )
            .await;
        debug!(
            "capture window ({}) opened by {} in {}",
            evidence.noun(),
            actor.id,
            surface
        );
        Ok(Reply::text(messages::capture_window_notice(evidence, ttl)))
    }

    /// Defense button pressed: hand the respondent the defense form.
    pub async fn open_defense_form(&self, actor: &Actor, surface: &ChannelId) -> Result<Reply> {
        let record = self.case_for(surface).await?;
        if let Some(respondent) = &record.respondent {
            if *respondent != actor.id && !self.is_staff(actor) {
                return Err(WorkflowError::AccessDenied(
                    "Only the named respondent can submit a defense.".to_string(),
                ));
            }
        }
        self.sessions
            .put(
                actor.id.clone(),
                SessionPayload::Defense {
                    surface: surface.clone(),
                },
                self.config.ttls.defense,
            )
            .await;
        Ok(Reply::modal(messages::defense_modal()))
    }

    /// The defense form came back. The session is consumed up front, so a
    /// failed submission needs the form opened again.
    pub async fn submit_defense(
        &self,
        actor: &Actor,
        fields: &HashMap<String, String>,
    ) -> Result<Reply> {
        let Some(SessionPayload::Defense { surface }) =
            self.sessions.take(&actor.id, SessionKind::Defense).await
        else {
            return Err(WorkflowError::SessionExpired(
                "The defense window has expired. Open the form again.".to_string(),
            ));
        };

        let defense = DefenseFields {
            video_link: optional_link(fields)?,
            argument: required_field(fields, messages::FIELD_ARGUMENT, "argument")?,
        };

        let lock = self.registry.surface_lock(&surface).await;
        let _guard = lock.lock().await;

        let record = self.case_for(&surface).await?;
        match &record.respondent {
            None => {
                // A defense through the unbound path names the respondent.
                self.registry
                    .bind_respondent(&surface, actor.id.clone())
                    .await;
                self.access.allow_identity(&surface, actor.id.clone()).await;
                info!("respondent {} bound to case {}", actor.id, surface);
            }
            Some(respondent) if *respondent != actor.id && !self.is_staff(actor) => {
                return Err(WorkflowError::AccessDenied(
                    "Only the named respondent can submit a defense.".to_string(),
                ));
            }
            Some(_) => {}
        }

        self.gateway
            .send_message(
                &surface,
                messages::defense_message(&self.config.style, actor, &defense),
            )
            .await?;
        let state = self
            .registry
            .apply_event(&surface, &CaseEvent::DefensePosted)
            .await;
        info!(
            "defense recorded in {} by {} (state now {:?})",
            surface, actor.id, state
        );
        Ok(Reply::text("Defense recorded."))
    }

    /// The staff console behind the panel button.
    pub async fn open_panel(&self, actor: &Actor, surface: &ChannelId) -> Result<Reply> {
        self.case_for(surface).await?;
        if !self.is_staff(actor) {
            return Err(WorkflowError::AccessDenied(
                "Only panel members can use the stewards panel.".to_string(),
            ));
        }
        Ok(messages::panel_reply())
    }

    /// Verdict button pressed: hand the steward the ruling form.
    pub async fn open_verdict_form(
        &self,
        actor: &Actor,
        surface: &ChannelId,
        verdict: Verdict,
    ) -> Result<Reply> {
        self.case_for(surface).await?;
        if !self.is_staff(actor) {
            return Err(WorkflowError::AccessDenied(
                "Only panel members can record a ruling.".to_string(),
            ));
        }
        Ok(Reply::modal(messages::verdict_modal(verdict)))
    }

    /// The ruling form came back: post the panel-attributed summary, move
    /// the case to judged, and relabel the surface.
    pub async fn record_verdict(
        &self,
        actor: &Actor,
        surface: &ChannelId,
        verdict: Verdict,
        fields: &HashMap<String, String>,
    ) -> Result<Reply> {
        let record = self.case_for(surface).await?;
        if !self.is_staff(actor) {
            return Err(WorkflowError::AccessDenied(
                "Only panel members can record a ruling.".to_string(),
            ));
        }

        let ruling = VerdictFields {
            regulation: required_field(fields, messages::FIELD_REGULATION, "regulation")?,
            sanction: required_field(fields, messages::FIELD_SANCTION, "sanction")?,
            rationale: required_field(fields, messages::FIELD_RATIONALE, "rationale")?,
        };

        let lock = self.registry.surface_lock(surface).await;
        let _guard = lock.lock().await;

        self.gateway
            .send_message(
                surface,
                messages::verdict_message(&self.config.style, verdict, &ruling),
            )
            .await?;
        self.registry
            .apply_event(surface, &CaseEvent::VerdictRecorded { verdict })
            .await;
        self.relabel_for_verdict(&record.parent, surface, verdict).await;

        if let Some(audit) = &self.config.audit_channel {
            best_effort(
                "audit post",
                self.gateway
                    .send_message(
                        audit,
                        messages::audit_verdict(
                            verdict,
                            &actor.display_name,
                            &format!("<#{}>", surface),
                        ),
                    )
                    .await,
            );
        }

        info!(
            "verdict {} recorded in {} by {}",
            verdict.token(),
            surface,
            actor.id
        );
        Ok(Reply::text(format!("Ruling recorded: {}", verdict.title())))
    }

    /// Passive message handling: the gatekeeper, then the capture listener.
    pub async fn handle_message(&self, message: &InboundMessage) -> Result<()> {
        if message.author.is_bot {
            return Ok(());
        }
        if self.registry.get(&message.channel).await.is_none() {
            return Ok(());
        }

        let lock = self.registry.surface_lock(&message.channel).await;
        let _guard = lock.lock().await;

        let staff = self.is_staff(&message.author);
        let allowed = self
            .access
            .is_allowed(&message.channel, &message.author.id, &message.author.roles, staff)
            .await;
        if !allowed {
            info!(
                "removing message {} from uninvolved author {} in {}",
                message.id, message.author.id, message.channel
            );
            best_effort(
                "uninvolved message removal",
                self.gateway
                    .delete_message(&message.channel, &message.id)
                    .await,
            );
            best_effort(
                "removal notice",
                self.gateway
                    .send_direct_message(
                        &message.author.id,
                        OutboundMessage::text(
                            "Your message was removed from a case discussion you are not part of.",
                        ),
                    )
                    .await,
            );
            return Ok(());
        }

        let Some(SessionPayload::Capture { evidence, surface }) = self
            .sessions
            .peek(&message.author.id, SessionKind::Capture)
            .await
        else {
            return Ok(());
        };
        if surface != message.channel {
            return Ok(());
        }
        let attachments: Vec<Attachment> = message
            .attachments
            .iter()
            .filter(|attachment| is_evidence_attachment(attachment))
            .cloned()
            .collect();
        if attachments.is_empty() {
            // Plain chatter keeps the window open for the next message.
            return Ok(());
        }

        self.gateway
            .send_message(
                &message.channel,
                messages::evidence_message(
                    &self.config.style,
                    evidence,
                    &message.author,
                    &attachments,
                ),
            )
            .await?;
        self.sessions
            .take(&message.author.id, SessionKind::Capture)
            .await;
        info!(
            "captured {} attachment(s) as {} evidence in {}",
            attachments.len(),
            evidence.noun(),
            message.channel
        );
        Ok(())
    }

    /// The "under review" category label offered by the cases channel, when
    /// there is one.
    async fn under_review_label(&self) -> Option<LabelId> {
        match self.gateway.list_labels(&self.config.cases_channel).await {
            Ok(labels) => find_label(&labels, UNDER_REVIEW_SYNONYMS).cloned(),
            Err(error) => {
                warn!("could not list category labels: {}", error);
                None
            }
        }
    }

    /// Swap the surface label for the verdict's. Never fails the verdict:
    /// a missing label or a platform refusal downgrades to a warning.
    async fn relabel_for_verdict(&self, parent: &ChannelId, surface: &ChannelId, verdict: Verdict) {
        let labels = match self.gateway.list_labels(parent).await {
            Ok(labels) => labels,
            Err(error) => {
                warn!("could not list category labels: {}", error);
                return;
            }
        };
        match find_label(&labels, verdict.label_synonyms()) {
            Some(label) => {
                if let Err(error) = self.gateway.edit_surface_label(surface, label).await {
                    warn!("could not relabel surface {}: {}", surface, error);
                }
            }
            None => warn!("no category label matches verdict {}", verdict.token()),
        }
    }
}
