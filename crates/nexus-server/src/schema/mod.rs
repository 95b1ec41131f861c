//! API schema types for request/response definitions.
//!
//! Request bodies are untyped JSON objects handed to collaborators, so only
//! the gateway's own responses are defined here.

pub mod agents;
pub mod scheduling;
pub mod status;
