//! The `AssignmentEngine` struct and its greedy solve loop.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, info, warn};

use dd_core::{
    Agent, AgentId, Assignment, DelayRange, DelayRng, DelaySampler, Location, Package,
    WarehouseId,
};

use crate::{
    ActiveSet, EngineConfig, EngineError, EngineObserver, EngineResult, NoopObserver, PendingQueue,
};

// ── Registration outcome ──────────────────────────────────────────────────────

/// Why a dynamic-agent registration was ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationWarning {
    /// The engine was built with `dynamic_agents_enabled = false`.
    DynamicAgentsDisabled { agent: AgentId },
}

impl fmt::Display for RegistrationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DynamicAgentsDisabled { agent } => write!(
                f,
                "dynamic agents are not enabled; registration of {agent} ignored"
            ),
        }
    }
}

/// Result of [`AssignmentEngine::register_dynamic_agent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Registration {
    /// Queued; the agent becomes active at package index `join_after`.
    Scheduled { join_after: usize },
    /// Not queued.  Non-fatal.
    Ignored(RegistrationWarning),
}

impl Registration {
    pub fn warning(&self) -> Option<&RegistrationWarning> {
        match self {
            Self::Ignored(w)       => Some(w),
            Self::Scheduled { .. } => None,
        }
    }
}

// ── AssignmentEngine ──────────────────────────────────────────────────────────

/// Greedy package-to-agent assigner.
///
/// Holds the immutable problem inputs, the dynamic-agent queue, and the
/// agent positions left by the last successful solve.  Create via
/// [`EngineBuilder`][crate::EngineBuilder].
///
/// The engine is single-owner: every mutating method takes `&mut self`.
pub struct AssignmentEngine<S: DelaySampler = DelayRng> {
    pub(crate) config:       EngineConfig,
    pub(crate) delay_range:  DelayRange,
    pub(crate) warehouses:   HashMap<WarehouseId, Location>,
    /// Initial agents in the order supplied.
    pub(crate) agents:       Vec<Agent>,
    /// Every agent id seen so far, initial and dynamic.
    pub(crate) known_agents: HashSet<AgentId>,
    pub(crate) packages:     Vec<Package>,
    pub(crate) pending:      PendingQueue,
    /// Final positions from the last successful solve.
    pub(crate) positions:    Option<ActiveSet>,
    pub(crate) sampler:      S,
}

impl<S: DelaySampler> AssignmentEngine<S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Schedule `agent` to become eligible once the package at zero-based
    /// index `join_after` is about to be processed.
    ///
    /// With dynamic agents disabled this is a no-op that returns
    /// [`Registration::Ignored`].  A duplicate agent id is an error.
    pub fn register_dynamic_agent(
        &mut self,
        agent:      Agent,
        join_after: usize,
    ) -> EngineResult<Registration> {
        if !self.config.dynamic_agents_enabled {
            let warning = RegistrationWarning::DynamicAgentsDisabled { agent: agent.id };
            warn!("{warning}");
            return Ok(Registration::Ignored(warning));
        }

        Location::try_new(agent.location.x, agent.location.y)?;
        if !self.known_agents.insert(agent.id.clone()) {
            return Err(EngineError::DuplicateAgent(agent.id));
        }

        info!(agent = %agent.id, join_after, "dynamic agent scheduled");
        self.pending.push(join_after, agent);
        Ok(Registration::Scheduled { join_after })
    }

    /// Assign every package, in input order.  See the crate docs for the
    /// per-package steps.
    pub fn solve(&mut self) -> EngineResult<Vec<Assignment>> {
        self.solve_with(&mut NoopObserver)
    }

    /// Like [`solve`](Self::solve) but reports progress to `observer`.
    ///
    /// Every call starts from the initial agent positions and the full
    /// pending queue, so repeated calls are independent.  On error nothing
    /// is returned and the positions from any earlier solve are kept.
    pub fn solve_with<O: EngineObserver>(
        &mut self,
        observer: &mut O,
    ) -> EngineResult<Vec<Assignment>> {
        let mut active = ActiveSet::from_agents(&self.agents);
        let mut pending = self.pending.clone();
        let mut assignments = Vec::with_capacity(self.packages.len());

        for (index, package) in self.packages.iter().enumerate() {
            // ── ① Admit dynamic agents ────────────────────────────────────
            if self.config.dynamic_agents_enabled {
                for agent in pending.drain_ready(index) {
                    info!(agent = %agent.id, package_number = index + 1, "dynamic agent joined");
                    observer.on_agent_admitted(&agent.id, index);
                    active.insert(agent.id, agent.location);
                }
            }

            // ── ② Resolve warehouse ───────────────────────────────────────
            let warehouse = self
                .warehouses
                .get(&package.warehouse)
                .copied()
                .ok_or_else(|| EngineError::UnresolvedWarehouse {
                    package:   package.id.clone(),
                    warehouse: package.warehouse.clone(),
                })?;

            // ── ③ Select nearest agent ────────────────────────────────────
            let (slot, distance) = active
                .nearest(warehouse, package.destination)
                .ok_or_else(|| EngineError::NoAvailableAgent { package: package.id.clone() })?;

            // ── ④ Delay ───────────────────────────────────────────────────
            let delay = if self.config.delays_enabled {
                self.sampler.sample(self.delay_range)
            } else {
                0.0
            };

            // ── ⑤ Record + ⑥ Move ─────────────────────────────────────────
            let agent = active.move_to(slot, package.destination).clone();
            debug!(
                package = %package.id,
                agent = %agent,
                distance,
                delay,
                "package assigned"
            );

            let assignment = Assignment {
                agent,
                package:   package.id.clone(),
                warehouse: package.warehouse.clone(),
                distance,
                delay,
                sequence:  index,
            };
            observer.on_assignment(&assignment);
            assignments.push(assignment);
        }

        observer.on_solve_end(&assignments);
        info!(
            packages = assignments.len(),
            agents = active.len(),
            "solve complete"
        );
        self.positions = Some(active);
        Ok(assignments)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Initial agents, in active-set order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }

    /// Ids of every agent known to the engine: initial agents in supplied
    /// order, then registered dynamic agents in registration order.
    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.agents
            .iter()
            .map(|a| a.id.clone())
            .chain(self.pending.iter().map(|p| p.agent.id.clone()))
            .collect()
    }

    /// Where `agent` ended up after the last successful solve.
    pub fn position(&self, agent: &AgentId) -> Option<Location> {
        self.positions.as_ref()?.position(agent)
    }

    /// Full active set from the last successful solve.
    pub fn final_positions(&self) -> Option<&ActiveSet> {
        self.positions.as_ref()
    }
}
