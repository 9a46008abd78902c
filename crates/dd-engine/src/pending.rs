//! `PendingQueue` — dynamic agents waiting for their join point.
//!
//! # Ordering
//!
//! Entries stay in registration order.  Thresholds are *not* sorted: when
//! several agents become ready at the same package index they are admitted
//! in the order they were registered, which fixes their position in the
//! active set and therefore the tie-break between them.
//!
//! Admission is a stable partition over the whole queue, O(Q) per package.
//! Queues are a handful of entries in practice.

use dd_core::{Agent, AgentId};

/// One registered dynamic agent.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingAgent {
    /// Zero-based package index at which the agent becomes active.
    pub join_after: usize,
    pub agent:      Agent,
}

/// Registration-ordered queue of agents not yet admitted.
#[derive(Clone, Debug, Default)]
pub struct PendingQueue {
    entries: Vec<PendingAgent>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `agent` to join once package index `join_after` is reached.
    pub fn push(&mut self, join_after: usize, agent: Agent) {
        self.entries.push(PendingAgent { join_after, agent });
    }

    /// Remove and return every agent with `join_after <= index`, in
    /// registration order.  Agents still waiting keep their relative order.
    pub fn drain_ready(&mut self, index: usize) -> Vec<Agent> {
        if !self.entries.iter().any(|p| p.join_after <= index) {
            return Vec::new();
        }
        let (ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|p| p.join_after <= index);
        self.entries = waiting;
        ready.into_iter().map(|p| p.agent).collect()
    }

    pub fn contains(&self, agent: &AgentId) -> bool {
        self.entries.iter().any(|p| &p.agent.id == agent)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingAgent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
