//! HTTP and WebSocket handler modules for the gateway.
//!
//! Handlers are thin: they unpack the request, mark the agent busy on the
//! roster, delegate to a collaborator from [`AppState`], and return its
//! JSON. No business logic lives in handlers.
//!
//! [`AppState`]: crate::state::AppState

pub mod agents;
pub mod intent;
pub mod relay;
pub mod scheduling;
pub mod status;
