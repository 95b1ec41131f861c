//! Collaborators behind the NexusSchedule agent gateway.
//!
//! The gateway never interprets requests itself. It hands them to the
//! traits in [`collaborator`], whose default implementations live in
//! [`intent`], [`booking`] and [`relay`]. [`reply`] phrases the answer to a
//! classified intent, and [`roster`] tracks which named agents are busy.

pub mod booking;
pub mod collaborator;
pub mod error;
pub mod intent;
pub mod relay;
pub mod reply;
pub mod roster;

// Re-export commonly used types
pub use booking::{
    AlternativeSlot, BookingOutcome, BookingRequest, NegotiationStep, SimulatedSchedulerAgent,
};
pub use collaborator::{IntentProcessor, MessageRouter, SchedulerAgent};
pub use error::CollaboratorError;
pub use intent::{Entities, Intent, IntentResult, KeywordIntentProcessor, Urgency};
pub use relay::{StubMessageRouter, AGENT_RESPONSE};
pub use reply::{respond, AgentReply};
pub use roster::{ActivityGuard, AgentKind, AgentRoster, AgentStatusView};
