//! tribunal_gateway - Platform connectivity for the tribunal workflow
//!
//! The workflow engine talks to the chat platform through the [`Gateway`]
//! trait only. This crate provides:
//! - `gateway` - the trait the engine consumes
//! - `wire` - outbound payload shapes (embeds, components, modals)
//! - `events` - inbound payload shapes (interactions, messages)
//! - `rest` - the REST implementation over reqwest

pub mod error;
pub mod events;
pub mod gateway;
pub mod rest;
pub mod wire;

pub use error::{GatewayError, Result};
pub use gateway::Gateway;
pub use rest::RestGateway;
