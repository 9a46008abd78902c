//! Fluent builder for constructing an [`AssignmentEngine`].

use std::collections::{HashMap, HashSet};

use dd_core::{Agent, DelayRng, DelaySampler, Location, Package, Warehouse};

use crate::{AssignmentEngine, EngineConfig, EngineError, EngineResult, PendingQueue};

/// Fluent builder for [`AssignmentEngine<S>`].
///
/// # Inputs
///
/// | Method             | Default                                        |
/// |--------------------|------------------------------------------------|
/// | `.warehouses(v)`   | none                                           |
/// | `.agents(v)`       | none                                           |
/// | `.packages(v)`     | none                                           |
/// | `.sampler(s)`      | `DelayRng` seeded from `config.seed`           |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(EngineConfig::default().with_delays(5.0, 30.0))
///     .warehouses(warehouses)
///     .agents(agents)
///     .packages(packages)
///     .sampler(DelayRng::new(42))
///     .build()?;
/// let assignments = engine.solve()?;
/// ```
pub struct EngineBuilder<S: DelaySampler = DelayRng> {
    config:     EngineConfig,
    warehouses: Vec<Warehouse>,
    agents:     Vec<Agent>,
    packages:   Vec<Package>,
    sampler:    S,
}

impl EngineBuilder<DelayRng> {
    /// Create a builder using the default `DelayRng` for delays.
    pub fn new(config: EngineConfig) -> Self {
        let sampler = DelayRng::from_seed_opt(config.seed);
        Self {
            config,
            warehouses: Vec::new(),
            agents:     Vec::new(),
            packages:   Vec::new(),
            sampler,
        }
    }
}

impl<S: DelaySampler> EngineBuilder<S> {
    pub fn warehouses(mut self, warehouses: impl IntoIterator<Item = Warehouse>) -> Self {
        self.warehouses.extend(warehouses);
        self
    }

    /// Initial agents.  Their order here is their order in the active set.
    pub fn agents(mut self, agents: impl IntoIterator<Item = Agent>) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Packages, in the order they are to be assigned.
    pub fn packages(mut self, packages: impl IntoIterator<Item = Package>) -> Self {
        self.packages.extend(packages);
        self
    }

    /// Replace the delay source.
    pub fn sampler<T: DelaySampler>(self, sampler: T) -> EngineBuilder<T> {
        EngineBuilder {
            config:     self.config,
            warehouses: self.warehouses,
            agents:     self.agents,
            packages:   self.packages,
            sampler,
        }
    }

    /// Validate inputs and return a ready-to-solve engine.
    ///
    /// Package warehouse references are *not* checked here; an unresolved
    /// reference fails [`AssignmentEngine::solve`] instead.
    pub fn build(self) -> EngineResult<AssignmentEngine<S>> {
        let delay_range = self.config.delay_range()?;

        // ── Warehouses: unique ids, finite positions ──────────────────────
        let mut warehouses = HashMap::with_capacity(self.warehouses.len());
        for w in self.warehouses {
            check_finite(w.location)?;
            if warehouses.insert(w.id.clone(), w.location).is_some() {
                return Err(EngineError::DuplicateWarehouse(w.id));
            }
        }

        // ── Agents: unique ids, finite positions ──────────────────────────
        let mut known_agents = HashSet::with_capacity(self.agents.len());
        for a in &self.agents {
            check_finite(a.location)?;
            if !known_agents.insert(a.id.clone()) {
                return Err(EngineError::DuplicateAgent(a.id.clone()));
            }
        }

        // ── Packages: unique ids, finite destinations ─────────────────────
        let mut package_ids = HashSet::with_capacity(self.packages.len());
        for p in &self.packages {
            check_finite(p.destination)?;
            if !package_ids.insert(&p.id) {
                return Err(EngineError::DuplicatePackage(p.id.clone()));
            }
        }

        Ok(AssignmentEngine {
            config:     self.config,
            delay_range,
            warehouses,
            agents:     self.agents,
            known_agents,
            packages:   self.packages,
            pending:    PendingQueue::new(),
            positions:  None,
            sampler:    self.sampler,
        })
    }
}

fn check_finite(loc: Location) -> EngineResult<()> {
    Location::try_new(loc.x, loc.y)?;
    Ok(())
}
