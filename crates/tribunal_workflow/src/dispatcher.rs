//! Event dispatcher
//!
//! Routes typed inbound events to engine operations and maps failures to
//! the single private notice an interactive event must receive. This is
//! the outermost catch: an interaction always gets exactly one reply, and
//! passive message handling never produces one.

use crate::engine::CaseWorkflow;
use crate::error::{Result, WorkflowError};
use crate::events::{Actor, InboundMessage, InteractionEvent, Reply};
use crate::messages;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use tribunal_core::{ChannelId, EvidenceKind, UserId, Verdict};
use tribunal_gateway::wire::REVIEW_COMMAND;

pub struct EventDispatcher {
    workflow: Arc<CaseWorkflow>,
}

/// Split a scoped custom id ("prefix:scope") on an exact prefix.
fn scoped<'a>(custom_id: &'a str, prefix: &str) -> Option<&'a str> {
    custom_id
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(':'))
}

/// The private notice shown for a failed interactive event. Gateway
/// failures never leak details to the invoker.
fn user_notice(error: &WorkflowError) -> String {
    match error {
        WorkflowError::Gateway(_) => {
            "Something went wrong while processing this action. Please try again.".to_string()
        }
        other => other.to_string(),
    }
}

impl EventDispatcher {
    pub fn new(workflow: Arc<CaseWorkflow>) -> Self {
        Self { workflow }
    }

    /// Handle one interactive event, producing the one reply sent back.
    pub async fn dispatch_interaction(&self, event: InteractionEvent) -> Reply {
        match self.route(&event).await {
            Ok(reply) => reply,
            Err(error) => {
                match &error {
                    WorkflowError::Gateway(gateway) => {
                        warn!(
                            "gateway failure while handling event from {}: {}",
                            event.actor().id,
                            gateway
                        );
                    }
                    other => {
                        debug!("event from {} rejected: {}", event.actor().id, other);
                    }
                }
                Reply::text(user_notice(&error))
            }
        }
    }

    /// Handle one passive message event. Failures are logged and dropped.
    pub async fn dispatch_message(&self, message: InboundMessage) {
        if let Err(error) = self.workflow.handle_message(&message).await {
            warn!("message handling failed in {}: {}", message.channel, error);
        }
    }

    async fn route(&self, event: &InteractionEvent) -> Result<Reply> {
        match event {
            InteractionEvent::Command { name, actor, .. } if name == REVIEW_COMMAND => {
                self.workflow.open_case(actor).await
            }
            InteractionEvent::Command { name, .. } => {
                debug!("ignoring unknown command /{}", name);
                Err(WorkflowError::Validation(
                    "This command is not supported.".to_string(),
                ))
            }
            InteractionEvent::Component {
                custom_id,
                actor,
                channel,
                values,
            } => self.route_component(custom_id, actor, channel, values).await,
            InteractionEvent::ModalSubmit {
                custom_id,
                actor,
                channel,
                fields,
            } => self.route_modal(custom_id, actor, channel, fields).await,
        }
    }

    async fn route_component(
        &self,
        custom_id: &str,
        actor: &Actor,
        channel: &ChannelId,
        values: &[UserId],
    ) -> Result<Reply> {
        if custom_id == messages::PICK_RESPONDENT {
            return self.workflow.choose_respondent(actor, values).await;
        }
        if custom_id == messages::PANEL {
            return self.workflow.open_panel(actor, channel).await;
        }
        if custom_id == messages::ATTACH_RULING {
            return self
                .workflow
                .open_capture(actor, channel, EvidenceKind::Verdict)
                .await;
        }
        if scoped(custom_id, messages::DEFENSE_PREFIX).is_some() {
            return self.workflow.open_defense_form(actor, channel).await;
        }
        if scoped(custom_id, messages::ATTACH_REQUEST_PREFIX).is_some() {
            return self
                .workflow
                .open_capture(actor, channel, EvidenceKind::Request)
                .await;
        }
        if scoped(custom_id, messages::ATTACH_DEFENSE_PREFIX).is_some() {
            return self
                .workflow
                .open_capture(actor, channel, EvidenceKind::Defense)
                .await;
        }
        if let Some(token) = scoped(custom_id, messages::VERDICT_PREFIX) {
            if let Some(verdict) = Verdict::from_token(token) {
                return self
                    .workflow
                    .open_verdict_form(actor, channel, verdict)
                    .await;
            }
        }
        debug!("unrecognized component {}", custom_id);
        Err(WorkflowError::Validation(
            "This action is not recognized.".to_string(),
        ))
    }

    async fn route_modal(
        &self,
        custom_id: &str,
        actor: &Actor,
        channel: &ChannelId,
        fields: &HashMap<String, String>,
    ) -> Result<Reply> {
        if custom_id == messages::REQUEST_FORM {
            return self.workflow.submit_request(actor, fields).await;
        }
        if custom_id == messages::DEFENSE_FORM {
            return self.workflow.submit_defense(actor, fields).await;
        }
        if let Some(token) = scoped(custom_id, messages::VERDICT_FORM_PREFIX) {
            if let Some(verdict) = Verdict::from_token(token) {
                return self
                    .workflow
                    .record_verdict(actor, channel, verdict, fields)
                    .await;
            }
        }
        debug!("unrecognized form {}", custom_id);
        Err(WorkflowError::Validation(
            "This form is not recognized.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tribunal_gateway::GatewayError;

    #[test]
    fn test_scoped_requires_exact_prefix_and_colon() {
        assert_eq!(scoped("case_defense:42", "case_defense"), Some("42"));
        assert_eq!(scoped("case_defense:any", "case_defense"), Some("any"));
        // A longer id sharing the start must not match the shorter prefix.
        assert_eq!(scoped("case_verdict_form:upheld", "case_verdict"), None);
        assert_eq!(scoped("case_defense_form", "case_defense"), None);
        assert_eq!(scoped("case_defense", "case_defense"), None);
    }

    #[test]
    fn test_user_notice_hides_gateway_details() {
        let gateway = WorkflowError::Gateway(GatewayError::Api {
            status: 500,
            message: "internal".to_string(),
        });
        assert!(!user_notice(&gateway).contains("internal"));

        let validation = WorkflowError::Validation("Select a member to continue.".to_string());
        assert_eq!(user_notice(&validation), "Select a member to continue.");
    }
}
