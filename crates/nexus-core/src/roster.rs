//! Activity tracking for the named agents.
//!
//! [`AgentRoster`] counts in-flight and completed calls per [`AgentKind`].
//! Callers hold an [`ActivityGuard`] for the duration of a call; dropping it
//! ends the call, so a cancelled request task never leaves an agent marked
//! busy.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 10;

/// The agents the gateway reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Scheduler,
    User,
    Provider,
    Priority,
}

impl AgentKind {
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Scheduler,
        AgentKind::User,
        AgentKind::Provider,
        AgentKind::Priority,
    ];

    /// Key used in status payloads, e.g. `schedulerAgent`.
    pub fn status_key(self) -> &'static str {
        match self {
            AgentKind::Scheduler => "schedulerAgent",
            AgentKind::User => "userAgent",
            AgentKind::Provider => "providerAgent",
            AgentKind::Priority => "priorityAgent",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.status_key())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Activity {
    in_flight: usize,
    handled: u64,
}

/// Reported state of one agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentStatusView {
    /// `active` while at least one call is in flight, otherwise `idle`.
    pub status: &'static str,
    /// In-flight calls over capacity, clamped to `1.0`.
    pub load: f64,
    /// Calls completed since startup.
    pub handled: u64,
}

/// Registry of agent activity.
///
/// Backed by `DashMap` so request tasks update it without a global lock.
#[derive(Debug)]
pub struct AgentRoster {
    activity: DashMap<AgentKind, Activity>,
    capacity: usize,
}

impl AgentRoster {
    /// Creates a roster where `capacity` concurrent calls means full load.
    pub fn new(capacity: usize) -> Self {
        let activity = DashMap::new();
        for kind in AgentKind::ALL {
            activity.insert(kind, Activity::default());
        }
        AgentRoster {
            activity,
            capacity: capacity.max(1),
        }
    }

    /// Marks the start of a call on `kind`.
    pub fn begin(self: &Arc<Self>, kind: AgentKind) -> ActivityGuard {
        self.activity.entry(kind).or_default().in_flight += 1;
        ActivityGuard {
            roster: Arc::clone(self),
            kind,
        }
    }

    fn finish(&self, kind: AgentKind) {
        if let Some(mut entry) = self.activity.get_mut(&kind) {
            entry.in_flight = entry.in_flight.saturating_sub(1);
            entry.handled += 1;
        }
    }

    /// Current status of one agent.
    pub fn status(&self, kind: AgentKind) -> AgentStatusView {
        let activity = self
            .activity
            .get(&kind)
            .map(|entry| *entry)
            .unwrap_or_default();
        AgentStatusView {
            status: if activity.in_flight > 0 { "active" } else { "idle" },
            load: (activity.in_flight as f64 / self.capacity as f64).min(1.0),
            handled: activity.handled,
        }
    }

    /// Status of every agent keyed by [`AgentKind::status_key`].
    pub fn snapshot(&self) -> BTreeMap<&'static str, AgentStatusView> {
        AgentKind::ALL
            .into_iter()
            .map(|kind| (kind.status_key(), self.status(kind)))
            .collect()
    }
}

impl Default for AgentRoster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Keeps an agent marked busy until dropped.
#[must_use = "the call ends when the guard is dropped"]
#[derive(Debug)]
pub struct ActivityGuard {
    roster: Arc<AgentRoster>,
    kind: AgentKind,
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.roster.finish(self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_tracks_in_flight_and_handled() {
        let roster = Arc::new(AgentRoster::new(4));
        assert_eq!(roster.status(AgentKind::Scheduler).status, "idle");

        let first = roster.begin(AgentKind::Scheduler);
        let second = roster.begin(AgentKind::Scheduler);
        let busy = roster.status(AgentKind::Scheduler);
        assert_eq!(busy.status, "active");
        assert_eq!(busy.load, 0.5);
        assert_eq!(busy.handled, 0);

        drop(first);
        drop(second);
        let done = roster.status(AgentKind::Scheduler);
        assert_eq!(done.status, "idle");
        assert_eq!(done.load, 0.0);
        assert_eq!(done.handled, 2);
        assert_eq!(roster.status(AgentKind::User).handled, 0);
    }

    #[test]
    fn load_is_clamped() {
        let roster = Arc::new(AgentRoster::new(1));
        let _a = roster.begin(AgentKind::Priority);
        let _b = roster.begin(AgentKind::Priority);
        assert_eq!(roster.status(AgentKind::Priority).load, 1.0);
    }

    #[test]
    fn snapshot_lists_every_agent() {
        let roster = AgentRoster::default();
        let snapshot = roster.snapshot();
        let keys: Vec<_> = snapshot.keys().copied().collect();
        assert_eq!(
            keys,
            vec!["priorityAgent", "providerAgent", "schedulerAgent", "userAgent"]
        );
    }

    #[tokio::test]
    async fn concurrent_guards_balance() {
        let roster = Arc::new(AgentRoster::default());
        let mut tasks = Vec::new();
        for _ in 0..32 {
            let roster = Arc::clone(&roster);
            tasks.push(tokio::spawn(async move {
                let _guard = roster.begin(AgentKind::User);
                tokio::task::yield_now().await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        let status = roster.status(AgentKind::User);
        assert_eq!(status.handled, 32);
        assert_eq!(status.status, "idle");
    }
}
