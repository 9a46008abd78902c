//! `ActiveSet` — agents currently eligible for assignment and where they are.
//!
//! Stored as an insertion-ordered `Vec`.  [`nearest`](ActiveSet::nearest)
//! visits agents in that order, and the order decides distance ties.

use dd_core::{Agent, AgentId, Location, trip_distance};

/// Insertion-ordered map from agent id to current position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActiveSet {
    slots: Vec<(AgentId, Location)>,
}

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the initial agents at their starting positions.
    pub fn from_agents(agents: &[Agent]) -> Self {
        Self {
            slots: agents.iter().map(|a| (a.id.clone(), a.location)).collect(),
        }
    }

    /// Append `agent` at `location`.  Callers guarantee id uniqueness.
    pub fn insert(&mut self, agent: AgentId, location: Location) {
        debug_assert!(!self.contains(&agent), "agent {agent} already active");
        self.slots.push((agent, location));
    }

    pub fn contains(&self, agent: &AgentId) -> bool {
        self.slots.iter().any(|(id, _)| id == agent)
    }

    /// Current tracked position of `agent`.
    pub fn position(&self, agent: &AgentId) -> Option<Location> {
        self.slots
            .iter()
            .find(|(id, _)| id == agent)
            .map(|(_, loc)| *loc)
    }

    /// The slot with the strictly smallest trip distance for a pickup at
    /// `warehouse` and drop-off at `destination`, with that distance.
    ///
    /// Ties keep the earliest slot.  `None` if the set is empty.
    pub fn nearest(&self, warehouse: Location, destination: Location) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (slot, (_, pos)) in self.slots.iter().enumerate() {
            let d = trip_distance(*pos, warehouse, destination);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((slot, d)),
            }
        }
        best
    }

    /// Move the agent in `slot` to `location`, returning its id.
    ///
    /// # Panics
    /// If `slot` is out of range.
    pub fn move_to(&mut self, slot: usize, location: Location) -> &AgentId {
        let entry = &mut self.slots[slot];
        entry.1 = location;
        &entry.0
    }

    /// Agents in active-set order.
    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, Location)> {
        self.slots.iter().map(|(id, loc)| (id, *loc))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
