//! HTTP ingest surface
//!
//! Three routes: interaction payloads (the HTTP response body is the one
//! interaction response), message-create payloads (fire and forget), and
//! a health probe. Translation from raw platform payloads to typed events
//! happens here, before anything reaches the dispatcher.

use crate::state::AppState;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use std::collections::HashMap;
use std::io;
use tracing::debug;
use tribunal_core::{parse_permissions, ChannelId, MessageId, RoleId, UserId};
use tribunal_gateway::events::{
    InteractionData, InteractionPayload, MessagePayload, INTERACTION_COMMAND,
    INTERACTION_COMPONENT, INTERACTION_MODAL_SUBMIT,
};
use tribunal_workflow::{Actor, Attachment, InboundMessage, InteractionEvent};

pub async fn run(state: AppState, port: u16) -> io::Result<()> {
    let state = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/events/interactions", web::post().to(interactions))
            .route("/events/messages", web::post().to(messages))
            .route("/health", web::get().to(health))
    })
    .bind(format!("0.0.0.0:{}", port))?
    .run()
    .await
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn interactions(
    state: web::Data<AppState>,
    payload: web::Json<InteractionPayload>,
) -> impl Responder {
    match classify(payload.into_inner()) {
        Some(event) => {
            let reply = state.dispatcher.dispatch_interaction(event).await;
            HttpResponse::Ok().json(reply.into_response())
        }
        None => {
            debug!("unsupported interaction payload");
            HttpResponse::BadRequest().json(serde_json::json!({ "error": "unsupported interaction" }))
        }
    }
}

async fn messages(
    state: web::Data<AppState>,
    payload: web::Json<MessagePayload>,
) -> impl Responder {
    state
        .dispatcher
        .dispatch_message(translate_message(payload.into_inner()))
        .await;
    HttpResponse::NoContent().finish()
}

/// Turn a raw interaction payload into a typed event. `None` for payload
/// kinds or shapes the workflow does not handle.
fn classify(payload: InteractionPayload) -> Option<InteractionEvent> {
    let actor = actor_from(&payload)?;
    let channel = ChannelId::new(payload.channel_id()?);
    let data = payload.data.as_ref()?;

    match payload.kind {
        INTERACTION_COMMAND => Some(InteractionEvent::Command {
            name: data.name.clone()?,
            actor,
            channel,
        }),
        INTERACTION_COMPONENT => Some(InteractionEvent::Component {
            custom_id: data.custom_id.clone()?,
            actor,
            channel,
            values: data
                .values
                .iter()
                .map(|value| UserId::new(value.as_str()))
                .collect(),
        }),
        INTERACTION_MODAL_SUBMIT => Some(InteractionEvent::ModalSubmit {
            custom_id: data.custom_id.clone()?,
            actor,
            channel,
            fields: modal_fields(data),
        }),
        _ => None,
    }
}

fn actor_from(payload: &InteractionPayload) -> Option<Actor> {
    let user = payload.actor()?;
    let display_name = payload
        .member
        .as_ref()
        .map(|member| member.display_name().to_string())
        .unwrap_or_else(|| user.display_name().to_string());
    let roles = payload
        .member
        .as_ref()
        .map(|member| {
            member
                .roles
                .iter()
                .map(|role| RoleId::new(role.as_str()))
                .collect()
        })
        .unwrap_or_default();
    let permissions = parse_permissions(
        payload
            .member
            .as_ref()
            .and_then(|member| member.permissions.as_deref()),
    );

    Some(Actor {
        id: user.id.clone(),
        display_name,
        roles,
        permissions,
        is_bot: user.bot,
    })
}

fn modal_fields(data: &InteractionData) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for row in &data.components {
        for field in &row.components {
            if let Some(value) = &field.value {
                fields.insert(field.custom_id.clone(), value.trim().to_string());
            }
        }
    }
    fields
}

/// Turn a raw message payload into the engine's message shape. Messages
/// carry no permissions bitfield, so staffness rests on roles alone.
fn translate_message(payload: MessagePayload) -> InboundMessage {
    let display_name = payload
        .member
        .as_ref()
        .map(|member| member.display_name().to_string())
        .unwrap_or_else(|| payload.author.display_name().to_string());
    let author = Actor {
        id: payload.author.id.clone(),
        display_name,
        roles: payload
            .author_roles()
            .into_iter()
            .map(RoleId::new)
            .collect(),
        permissions: 0,
        is_bot: payload.author.bot,
    };

    InboundMessage {
        id: MessageId::new(payload.id),
        channel: ChannelId::new(payload.channel_id),
        author,
        attachments: payload
            .attachments
            .into_iter()
            .map(|attachment| Attachment {
                url: attachment.url,
                filename: attachment.filename,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    // A bare `use actix_web::test` would also import the async-test
    // attribute macro and shadow the harness's `#[test]`.
    use actix_web::test as actix_test;

    fn interaction(json: &str) -> InteractionPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_classify_command() {
        let payload = interaction(
            r#"{
                "id": "i1", "type": 2, "token": "t",
                "data": {"name": "review"},
                "member": {
                    "user": {"id": "1", "username": "ana"},
                    "nick": "Ana",
                    "roles": ["100"],
                    "permissions": "8192"
                },
                "channel": {"id": "500", "type": 15}
            }"#,
        );
        let event = classify(payload).unwrap();
        match event {
            InteractionEvent::Command { name, actor, channel } => {
                assert_eq!(name, "review");
                assert_eq!(actor.id.as_str(), "1");
                assert_eq!(actor.display_name, "Ana");
                assert_eq!(actor.permissions, 8192);
                assert_eq!(channel.as_str(), "500");
            }
            _ => panic!("expected a command event"),
        }
    }

    #[test]
    fn test_classify_component_with_selected_users() {
        let payload = interaction(
            r#"{
                "id": "i2", "type": 3, "token": "t",
                "data": {"custom_id": "case_pick", "values": ["2"]},
                "member": {"user": {"id": "1", "username": "ana"}},
                "channel_id": "500"
            }"#,
        );
        let event = classify(payload).unwrap();
        match event {
            InteractionEvent::Component {
                custom_id, values, ..
            } => {
                assert_eq!(custom_id, "case_pick");
                assert_eq!(values.len(), 1);
                assert_eq!(values[0].as_str(), "2");
            }
            _ => panic!("expected a component event"),
        }
    }

    #[test]
    fn test_classify_modal_collects_trimmed_fields() {
        let payload = interaction(
            r#"{
                "id": "i3", "type": 5, "token": "t",
                "data": {
                    "custom_id": "case_request_form",
                    "components": [
                        {"components": [{"custom_id": "damage_type", "value": " Collision "}]},
                        {"components": [{"custom_id": "argument", "value": "turn 3"}]}
                    ]
                },
                "member": {"user": {"id": "1", "username": "ana"}},
                "channel_id": "500"
            }"#,
        );
        let event = classify(payload).unwrap();
        match event {
            InteractionEvent::ModalSubmit { fields, .. } => {
                assert_eq!(fields["damage_type"], "Collision");
                assert_eq!(fields["argument"], "turn 3");
            }
            _ => panic!("expected a modal event"),
        }
    }

    #[test]
    fn test_classify_rejects_unknown_kinds() {
        let ping = interaction(r#"{"id": "i4", "type": 1, "token": "t"}"#);
        assert!(classify(ping).is_none());
    }

    #[test]
    fn test_translate_message_keeps_roles_and_attachments() {
        let payload: MessagePayload = serde_json::from_str(
            r#"{
                "id": "m1", "channel_id": "8000",
                "author": {"id": "2", "username": "bruno"},
                "member": {"user": {"id": "2", "username": "bruno"}, "roles": ["5"]},
                "attachments": [
                    {"id": "a1", "url": "https://cdn.test/clip.mp4", "filename": "clip.mp4"}
                ]
            }"#,
        )
        .unwrap();
        let message = translate_message(payload);
        assert_eq!(message.channel.as_str(), "8000");
        assert_eq!(message.author.roles.len(), 1);
        assert_eq!(message.author.permissions, 0);
        assert_eq!(message.attachments[0].filename, "clip.mp4");
    }

    #[actix_web::test]
    async fn test_health_route() {
        let app = actix_test::init_service(
            App::new().route("/health", web::get().to(health)),
        )
        .await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health").to_request(),
        )
        .await;
        assert!(response.status().is_success());
    }
}
