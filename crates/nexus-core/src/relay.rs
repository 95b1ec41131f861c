//! Default router for the agent-communication socket.

use async_trait::async_trait;

use crate::collaborator::MessageRouter;
use crate::error::CollaboratorError;

/// Reply sent for every inbound message by [`StubMessageRouter`].
pub const AGENT_RESPONSE: &str = "Agent response";

/// Answers every message with [`AGENT_RESPONSE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StubMessageRouter;

#[async_trait]
impl MessageRouter for StubMessageRouter {
    async fn route(&self, message: &str) -> Result<String, CollaboratorError> {
        tracing::trace!(len = message.len(), "routing agent message");
        Ok(AGENT_RESPONSE.to_string())
    }
}
