//! Schema types for agent status reporting.

use std::collections::BTreeMap;

use nexus_core::AgentStatusView;
use serde::Serialize;

/// Response for `GET /agents/status`.
#[derive(Debug, Clone, Serialize)]
pub struct AgentStatusResponse {
    /// Status per agent, keyed like `schedulerAgent`.
    pub agents: BTreeMap<&'static str, AgentStatusView>,
    /// Open agent-communication sockets.
    pub connections: usize,
}
