//! Shared application state

use crate::config::Cli;
use std::sync::Arc;
use tracing::{info, warn};
use tribunal_gateway::{Gateway, RestGateway};
use tribunal_sessions::SessionStore;
use tribunal_workflow::{CaseWorkflow, EventDispatcher};

pub struct AppState {
    pub dispatcher: EventDispatcher,
}

impl AppState {
    /// Wire the REST gateway, the engine and the dispatcher, and register
    /// the guild slash command. A failed registration is logged and does
    /// not stop the service; the command may already exist.
    pub async fn build(cli: &Cli) -> Self {
        let rest = RestGateway::new(cli.token.as_str(), cli.guild_id.as_str());
        match rest.register_guild_commands(&cli.application_id).await {
            Ok(()) => info!("guild commands registered"),
            Err(error) => warn!("could not register guild commands: {}", error),
        }

        let gateway: Arc<dyn Gateway> = Arc::new(rest);
        let workflow = Arc::new(CaseWorkflow::new(
            gateway,
            Arc::new(SessionStore::new()),
            cli.workflow_config(),
        ));
        Self {
            dispatcher: EventDispatcher::new(workflow),
        }
    }
}
