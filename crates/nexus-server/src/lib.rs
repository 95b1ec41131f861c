//! HTTP/WebSocket gateway for the NexusSchedule agent collaborators.
//!
//! Exposes intent processing, appointment scheduling, agent status and a
//! WebSocket relay. This crate contains the configuration, application
//! state, error mapping and route definitions; the collaborators themselves
//! live in `nexus-core`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;
pub mod upstream;
