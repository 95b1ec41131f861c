//! Traits the gateway delegates to.
//!
//! Implementations are constructed once at startup and shared by every
//! request task as `Arc<dyn Trait>`, so they must be `Send + Sync`.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::booking::AlternativeSlot;
use crate::error::CollaboratorError;

/// Turns free text into a structured intent.
#[async_trait]
pub trait IntentProcessor: Send + Sync {
    /// Processes `text` (possibly empty) and returns a JSON result that the
    /// gateway passes back unchanged.
    async fn process(&self, text: &str) -> Result<Value, CollaboratorError>;
}

/// Books appointments on behalf of a client.
#[async_trait]
pub trait SchedulerAgent: Send + Sync {
    /// Handles a raw booking request body.
    async fn process_booking_request(
        &self,
        request: Map<String, Value>,
    ) -> Result<Value, CollaboratorError>;

    /// Suggests other slots for a request that cannot be honored as asked.
    async fn find_alternatives(
        &self,
        request: Map<String, Value>,
    ) -> Result<Vec<AlternativeSlot>, CollaboratorError>;
}

/// Answers messages arriving on the agent-communication socket.
#[async_trait]
pub trait MessageRouter: Send + Sync {
    /// Returns the single reply for one inbound text frame.
    async fn route(&self, message: &str) -> Result<String, CollaboratorError>;
}
