//! Application state holding the injected collaborators.
//!
//! [`AppState`] is cloned into every handler task. Collaborators are built
//! once (from [`GatewayConfig`] by default) and shared as `Arc<dyn Trait>`;
//! the `with_*` methods swap any of them, which is how tests substitute
//! fakes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use nexus_core::{
    AgentRoster, CollaboratorError, IntentProcessor, KeywordIntentProcessor, MessageRouter,
    SchedulerAgent, SimulatedSchedulerAgent, StubMessageRouter,
};

use crate::config::GatewayConfig;
use crate::upstream::UpstreamIntentProcessor;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Handles `POST /process-intent`.
    pub intent_processor: Arc<dyn IntentProcessor>,
    /// Handles booking and alternative-slot requests.
    pub scheduler: Arc<dyn SchedulerAgent>,
    /// Answers frames on the agent-communication socket.
    pub message_router: Arc<dyn MessageRouter>,
    /// Per-agent activity for `GET /agents/status`.
    pub roster: Arc<AgentRoster>,
    connections: Arc<AtomicUsize>,
}

impl AppState {
    /// Creates state with the default collaborators described by `config`.
    ///
    /// Fails only if the upstream intent client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self, CollaboratorError> {
        let local: Arc<dyn IntentProcessor> = Arc::new(KeywordIntentProcessor::new());
        let intent_processor: Arc<dyn IntentProcessor> = match &config.intent_upstream_url {
            Some(url) => {
                let upstream =
                    UpstreamIntentProcessor::new(url, config.intent_upstream_timeout, local)?;
                tracing::info!(endpoint = upstream.endpoint(), "using intent upstream");
                Arc::new(upstream)
            }
            None => local,
        };

        Ok(AppState {
            intent_processor,
            scheduler: Arc::new(SimulatedSchedulerAgent::new()),
            message_router: Arc::new(StubMessageRouter),
            roster: Arc::new(AgentRoster::new(config.agent_capacity)),
            connections: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Creates state from [`GatewayConfig::default`] (for testing).
    pub fn with_defaults() -> Self {
        AppState {
            intent_processor: Arc::new(KeywordIntentProcessor::new()),
            scheduler: Arc::new(SimulatedSchedulerAgent::new()),
            message_router: Arc::new(StubMessageRouter),
            roster: Arc::new(AgentRoster::default()),
            connections: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_intent_processor(mut self, processor: Arc<dyn IntentProcessor>) -> Self {
        self.intent_processor = processor;
        self
    }

    pub fn with_scheduler(mut self, scheduler: Arc<dyn SchedulerAgent>) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn with_message_router(mut self, router: Arc<dyn MessageRouter>) -> Self {
        self.message_router = router;
        self
    }

    /// Number of open agent-communication sockets.
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Counts a socket as open until the returned guard is dropped.
    pub(crate) fn track_connection(&self) -> ConnectionGuard {
        self.connections.fetch_add(1, Ordering::SeqCst);
        ConnectionGuard {
            connections: Arc::clone(&self.connections),
        }
    }
}

pub(crate) struct ConnectionGuard {
    connections: Arc<AtomicUsize>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.connections.fetch_sub(1, Ordering::SeqCst);
    }
}
