//! Integration tests for dd-engine.

use dd_core::{Agent, AgentId, Assignment, DelayRange, DelaySampler, Location, Package, Warehouse};

use crate::{AssignmentEngine, EngineBuilder, EngineConfig, EngineObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn loc(x: f64, y: f64) -> Location {
    Location::new(x, y)
}

fn agent(id: &str, x: f64, y: f64) -> Agent {
    Agent::new(id, loc(x, y))
}

fn package(id: &str, warehouse: &str, x: f64, y: f64) -> Package {
    Package::new(id, warehouse, loc(x, y))
}

fn engine(
    config:     EngineConfig,
    warehouses: Vec<Warehouse>,
    agents:     Vec<Agent>,
    packages:   Vec<Package>,
) -> AssignmentEngine {
    EngineBuilder::new(config)
        .warehouses(warehouses)
        .agents(agents)
        .packages(packages)
        .build()
        .unwrap()
}

/// Two warehouses, three agents, five packages.
fn base_case(config: EngineConfig) -> AssignmentEngine {
    engine(
        config,
        vec![
            Warehouse::new("W1", loc(0.0, 0.0)),
            Warehouse::new("W2", loc(50.0, 50.0)),
        ],
        vec![
            agent("A1", 5.0, 5.0),
            agent("A2", 60.0, 60.0),
            agent("A3", 20.0, 80.0),
        ],
        vec![
            package("P1", "W1", 10.0, 10.0),
            package("P2", "W2", 55.0, 40.0),
            package("P3", "W1", 3.0, 20.0),
            package("P4", "W2", 70.0, 70.0),
            package("P5", "W1", 1.0, 1.0),
        ],
    )
}

/// Returns delays from a fixed script, cycling.
struct ScriptedDelays {
    values: Vec<f64>,
    next:   usize,
}

impl ScriptedDelays {
    fn new(values: &[f64]) -> Self {
        Self { values: values.to_vec(), next: 0 }
    }
}

impl DelaySampler for ScriptedDelays {
    fn sample(&mut self, _range: DelayRange) -> f64 {
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v
    }
}

#[derive(Default)]
struct RecordingObserver {
    admitted:    Vec<(AgentId, usize)>,
    assignments: Vec<Assignment>,
    ended:       bool,
}

impl EngineObserver for RecordingObserver {
    fn on_agent_admitted(&mut self, agent: &AgentId, index: usize) {
        self.admitted.push((agent.clone(), index));
    }

    fn on_assignment(&mut self, assignment: &Assignment) {
        self.assignments.push(assignment.clone());
    }

    fn on_solve_end(&mut self, _assignments: &[Assignment]) {
        self.ended = true;
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::EngineError;

    #[test]
    fn builds_with_defaults() {
        let e = base_case(EngineConfig::default());
        assert_eq!(e.agents().len(), 3);
        assert_eq!(e.packages().len(), 5);
        assert!(e.pending().is_empty());
        assert!(e.final_positions().is_none());
    }

    #[test]
    fn inverted_delay_range_errors() {
        let result = EngineBuilder::new(EngineConfig::default().with_delays(30.0, 5.0)).build();
        assert!(matches!(result, Err(EngineError::Core(_))));
    }

    #[test]
    fn duplicate_initial_agent_errors() {
        let result = EngineBuilder::new(EngineConfig::default())
            .agents([agent("A1", 0.0, 0.0), agent("A1", 1.0, 1.0)])
            .build();
        assert!(matches!(result, Err(EngineError::DuplicateAgent(id)) if id.as_str() == "A1"));
    }

    #[test]
    fn duplicate_warehouse_errors() {
        let result = EngineBuilder::new(EngineConfig::default())
            .warehouses([
                Warehouse::new("W1", loc(0.0, 0.0)),
                Warehouse::new("W1", loc(1.0, 0.0)),
            ])
            .build();
        assert!(matches!(result, Err(EngineError::DuplicateWarehouse(_))));
    }

    #[test]
    fn duplicate_package_errors() {
        let result = EngineBuilder::new(EngineConfig::default())
            .warehouses([Warehouse::new("W1", loc(0.0, 0.0))])
            .agents([agent("A1", 0.0, 0.0)])
            .packages([
                Package::new("P1", "W1", loc(10.0, 0.0)),
                Package::new("P1", "W1", loc(0.0, 99.0)),
            ])
            .build();
        assert!(matches!(result, Err(EngineError::DuplicatePackage(id)) if id.as_str() == "P1"));
    }

    #[test]
    fn non_finite_destination_errors() {
        let result = EngineBuilder::new(EngineConfig::default())
            .packages([package("P1", "W1", f64::NAN, 0.0)])
            .build();
        assert!(matches!(result, Err(EngineError::Core(_))));
    }

    #[test]
    fn unknown_warehouse_is_not_a_build_error() {
        let result = EngineBuilder::new(EngineConfig::default())
            .agents([agent("A1", 0.0, 0.0)])
            .packages([package("P1", "W_MISSING", 1.0, 1.0)])
            .build();
        assert!(result.is_ok());
    }
}

// ── Greedy solve ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod solve_tests {
    use super::*;

    #[test]
    fn one_assignment_per_package_in_input_order() {
        let mut e = base_case(EngineConfig::default());
        let out = e.solve().unwrap();
        assert_eq!(out.len(), 5);
        let ids: Vec<_> = out.iter().map(|a| a.package.as_str()).collect();
        assert_eq!(ids, ["P1", "P2", "P3", "P4", "P5"]);
        for (i, a) in out.iter().enumerate() {
            assert_eq!(a.sequence, i);
            assert_eq!(a.delay, 0.0);
        }
    }

    #[test]
    fn greedy_choices_on_base_case() {
        let mut e = base_case(EngineConfig::default());
        let out = e.solve().unwrap();
        let agents: Vec<_> = out.iter().map(|a| a.agent.as_str()).collect();
        // P1: A1 is next to W1.  P2/P4: A2 is next to W2.  A1 stays close to W1.
        assert_eq!(agents, ["A1", "A2", "A1", "A2", "A1"]);
    }

    #[test]
    fn trip_distance_is_exact() {
        let mut e = engine(
            EngineConfig::default(),
            vec![Warehouse::new("W1", loc(3.0, 0.0))],
            vec![agent("A1", 0.0, 0.0)],
            vec![package("P1", "W1", 3.0, 4.0)],
        );
        let out = e.solve().unwrap();
        assert_eq!(out[0].distance, 7.0);
        assert_eq!(out[0].warehouse.as_str(), "W1");
    }

    #[test]
    fn position_carries_over_between_packages() {
        let mut e = engine(
            EngineConfig::default(),
            vec![Warehouse::new("W1", loc(3.0, 0.0))],
            vec![agent("A1", 0.0, 0.0)],
            vec![
                package("P1", "W1", 3.0, 4.0),
                package("P2", "W1", 6.0, 4.0),
            ],
        );
        let out = e.solve().unwrap();
        // P1: (0,0)→(3,0)→(3,4) = 3 + 4.
        assert_eq!(out[0].distance, 7.0);
        // P2 starts at (3,4): (3,4)→(3,0)→(6,4) = 4 + 5.
        assert_eq!(out[1].distance, 9.0);
        assert_eq!(out.iter().map(|a| a.distance).sum::<f64>(), 16.0);
        assert_eq!(e.position(&AgentId::from("A1")), Some(loc(6.0, 4.0)));
    }

    #[test]
    fn tie_goes_to_first_supplied_agent() {
        for _ in 0..10 {
            let mut e = engine(
                EngineConfig::default(),
                vec![Warehouse::new("W1", loc(0.0, 0.0))],
                vec![agent("B", -2.0, 0.0), agent("A", 2.0, 0.0)],
                vec![package("P1", "W1", 0.0, 5.0)],
            );
            let out = e.solve().unwrap();
            assert_eq!(out[0].agent.as_str(), "B");
        }
    }

    #[test]
    fn repeated_solves_are_identical() {
        let mut e = base_case(EngineConfig::default());
        let first = e.solve().unwrap();
        let second = e.solve().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unresolved_warehouse_fails_whole_solve() {
        let mut e = engine(
            EngineConfig::default(),
            vec![Warehouse::new("W1", loc(0.0, 0.0))],
            vec![agent("A1", 0.0, 0.0)],
            vec![
                package("P1", "W1", 1.0, 1.0),
                package("P2", "W_MISSING", 1.0, 1.0),
            ],
        );
        let mut obs = RecordingObserver::default();
        let err = e.solve_with(&mut obs).unwrap_err();
        match err {
            crate::EngineError::UnresolvedWarehouse { package, warehouse } => {
                assert_eq!(package.as_str(), "P2");
                assert_eq!(warehouse.as_str(), "W_MISSING");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!obs.ended);
        assert!(e.final_positions().is_none());
    }

    #[test]
    fn no_agents_is_availability_error() {
        let mut e = engine(
            EngineConfig::default(),
            vec![Warehouse::new("W1", loc(0.0, 0.0))],
            vec![],
            vec![package("P1", "W1", 1.0, 1.0)],
        );
        let err = e.solve().unwrap_err();
        assert!(
            matches!(err, crate::EngineError::NoAvailableAgent { ref package } if package.as_str() == "P1"),
            "got {err}"
        );
    }

    #[test]
    fn no_packages_yields_empty_list() {
        let mut e = engine(
            EngineConfig::default(),
            vec![],
            vec![agent("A1", 0.0, 0.0)],
            vec![],
        );
        assert!(e.solve().unwrap().is_empty());
        assert_eq!(e.position(&AgentId::from("A1")), Some(loc(0.0, 0.0)));
    }

    #[test]
    fn observer_sees_every_assignment() {
        let mut e = base_case(EngineConfig::default());
        let mut obs = RecordingObserver::default();
        let out = e.solve_with(&mut obs).unwrap();
        assert_eq!(obs.assignments, out);
        assert!(obs.ended);
        assert!(obs.admitted.is_empty());
    }
}

// ── Delays ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod delay_tests {
    use dd_core::DelayRng;

    use super::*;

    #[test]
    fn injected_sampler_values_are_recorded() {
        let config = EngineConfig::default().with_delays(5.0, 30.0);
        let mut e = EngineBuilder::new(config)
            .warehouses([Warehouse::new("W1", loc(0.0, 0.0))])
            .agents([agent("A1", 0.0, 0.0)])
            .packages([
                package("P1", "W1", 1.0, 0.0),
                package("P2", "W1", 2.0, 0.0),
                package("P3", "W1", 3.0, 0.0),
            ])
            .sampler(ScriptedDelays::new(&[7.5, 12.0, 29.0]))
            .build()
            .unwrap();
        let delays: Vec<f64> = e.solve().unwrap().iter().map(|a| a.delay).collect();
        assert_eq!(delays, [7.5, 12.0, 29.0]);
    }

    #[test]
    fn delays_do_not_change_choices() {
        let mut plain = base_case(EngineConfig::default());
        let mut delayed = base_case(EngineConfig::default().with_delays(5.0, 30.0).with_seed(9));
        let a = plain.solve().unwrap();
        let b = delayed.solve().unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.agent, y.agent);
            assert_eq!(x.distance, y.distance);
            assert!((5.0..=30.0).contains(&y.delay));
        }
    }

    #[test]
    fn disabled_delays_never_sample() {
        struct Panicking;
        impl DelaySampler for Panicking {
            fn sample(&mut self, _range: DelayRange) -> f64 {
                panic!("sampler called with delays disabled")
            }
        }
        let mut e = EngineBuilder::new(EngineConfig::default())
            .warehouses([Warehouse::new("W1", loc(0.0, 0.0))])
            .agents([agent("A1", 0.0, 0.0)])
            .packages([package("P1", "W1", 1.0, 0.0)])
            .sampler(Panicking)
            .build()
            .unwrap();
        assert_eq!(e.solve().unwrap()[0].delay, 0.0);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = EngineConfig::default().with_delays(5.0, 30.0);
        let run = || {
            EngineBuilder::new(config.clone())
                .warehouses([Warehouse::new("W1", loc(0.0, 0.0))])
                .agents([agent("A1", 0.0, 0.0)])
                .packages([package("P1", "W1", 1.0, 0.0), package("P2", "W1", 2.0, 0.0)])
                .sampler(DelayRng::new(123))
                .build()
                .unwrap()
                .solve()
                .unwrap()
        };
        assert_eq!(run(), run());
    }
}

// ── Dynamic agents ────────────────────────────────────────────────────────────

#[cfg(test)]
mod dynamic_tests {
    use super::*;
    use crate::{EngineError, Registration, RegistrationWarning};

    /// One far-away initial agent; the dynamic agent sits on the packages.
    fn gating_engine() -> AssignmentEngine {
        engine(
            EngineConfig::default().with_dynamic_agents(),
            vec![Warehouse::new("W1", loc(100.0, 0.0))],
            vec![agent("A1", 0.0, 0.0)],
            vec![
                package("P0", "W1", 0.0, 0.0),
                package("P1", "W1", 0.0, 0.0),
                package("P2", "W1", 100.0, 1.0),
                package("P3", "W1", 100.0, 1.0),
            ],
        )
    }

    #[test]
    fn agent_is_gated_until_threshold() {
        let mut e = gating_engine();
        let reg = e.register_dynamic_agent(agent("D1", 100.0, 0.0), 2).unwrap();
        assert_eq!(reg, Registration::Scheduled { join_after: 2 });

        let mut obs = RecordingObserver::default();
        let out = e.solve_with(&mut obs).unwrap();
        let agents: Vec<_> = out.iter().map(|a| a.agent.as_str()).collect();
        assert_eq!(agents, ["A1", "A1", "D1", "D1"]);
        assert_eq!(obs.admitted, vec![(AgentId::from("D1"), 2)]);
    }

    #[test]
    fn threshold_zero_is_active_from_start() {
        let mut e = gating_engine();
        e.register_dynamic_agent(agent("D1", 100.0, 0.0), 0).unwrap();
        let out = e.solve().unwrap();
        assert_eq!(out[0].agent.as_str(), "D1");
    }

    #[test]
    fn unreached_threshold_never_admits() {
        let mut e = gating_engine();
        e.register_dynamic_agent(agent("D1", 100.0, 0.0), 99).unwrap();
        let out = e.solve().unwrap();
        assert!(out.iter().all(|a| a.agent.as_str() == "A1"));
        assert!(e.position(&AgentId::from("D1")).is_none());
    }

    #[test]
    fn only_pending_agents_that_never_join_is_availability_error() {
        let mut e = engine(
            EngineConfig::default().with_dynamic_agents(),
            vec![Warehouse::new("W1", loc(0.0, 0.0))],
            vec![],
            vec![package("P1", "W1", 1.0, 1.0)],
        );
        e.register_dynamic_agent(agent("D1", 0.0, 0.0), 5).unwrap();
        assert!(matches!(e.solve(), Err(EngineError::NoAvailableAgent { .. })));
    }

    #[test]
    fn same_step_admissions_keep_registration_order() {
        let mut e = engine(
            EngineConfig::default().with_dynamic_agents(),
            vec![Warehouse::new("W1", loc(0.0, 0.0))],
            vec![],
            vec![package("P0", "W1", 0.0, 1.0), package("P1", "W1", 0.0, 1.0)],
        );
        // Registered later but with a smaller threshold: both ready at index 1.
        e.register_dynamic_agent(agent("Z", 1.0, 0.0), 1).unwrap();
        e.register_dynamic_agent(agent("Y", -1.0, 0.0), 0).unwrap();
        e.register_dynamic_agent(agent("X", 0.0, -1.0), 1).unwrap();

        let mut obs = RecordingObserver::default();
        e.solve_with(&mut obs).unwrap();
        let order: Vec<_> = obs.admitted.iter().map(|(id, i)| (id.as_str(), *i)).collect();
        assert_eq!(order, [("Y", 0), ("Z", 1), ("X", 1)]);
    }

    #[test]
    fn admitted_agents_tie_break_by_registration() {
        let mut e = engine(
            EngineConfig::default().with_dynamic_agents(),
            vec![Warehouse::new("W1", loc(0.0, 0.0))],
            vec![],
            vec![package("P0", "W1", 0.0, 1.0)],
        );
        e.register_dynamic_agent(agent("Second", 1.0, 0.0), 0).unwrap();
        e.register_dynamic_agent(agent("First", -1.0, 0.0), 0).unwrap();
        assert_eq!(e.solve().unwrap()[0].agent.as_str(), "Second");
    }

    #[test]
    fn disabled_registration_is_ignored_with_warning() {
        let mut e = base_case(EngineConfig::default());
        let reg = e.register_dynamic_agent(agent("D1", 0.0, 0.0), 0).unwrap();
        assert_eq!(
            reg.warning(),
            Some(&RegistrationWarning::DynamicAgentsDisabled { agent: AgentId::from("D1") })
        );
        assert!(e.pending().is_empty());
        let out = e.solve().unwrap();
        assert!(out.iter().all(|a| a.agent.as_str() != "D1"));
    }

    #[test]
    fn colliding_dynamic_id_errors() {
        let mut e = gating_engine();
        let err = e.register_dynamic_agent(agent("A1", 1.0, 1.0), 1).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateAgent(_)));

        e.register_dynamic_agent(agent("D1", 1.0, 1.0), 1).unwrap();
        let err = e.register_dynamic_agent(agent("D1", 2.0, 2.0), 2).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateAgent(_)));
        assert_eq!(e.pending().len(), 1);
    }

    #[test]
    fn repeated_solves_readmit_pending_agents() {
        let mut e = gating_engine();
        e.register_dynamic_agent(agent("D1", 100.0, 0.0), 2).unwrap();
        let first = e.solve().unwrap();
        let second = e.solve().unwrap();
        assert_eq!(first, second);
        assert_eq!(e.pending().len(), 1);
    }

    #[test]
    fn agent_ids_lists_initial_then_dynamic() {
        let mut e = gating_engine();
        e.register_dynamic_agent(agent("D1", 100.0, 0.0), 2).unwrap();
        let ids: Vec<_> = e.agent_ids().into_iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, ["A1", "D1"]);
    }
}

// ── Building blocks ───────────────────────────────────────────────────────────

#[cfg(test)]
mod queue_tests {
    use super::*;
    use crate::{ActiveSet, PendingQueue};

    #[test]
    fn drain_ready_is_stable_partition() {
        let mut q = PendingQueue::new();
        q.push(3, agent("a", 0.0, 0.0));
        q.push(1, agent("b", 0.0, 0.0));
        q.push(5, agent("c", 0.0, 0.0));
        q.push(0, agent("d", 0.0, 0.0));

        let ready: Vec<_> = q.drain_ready(3).into_iter().map(|a| a.id.to_string()).collect();
        assert_eq!(ready, ["a", "b", "d"]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.iter().map(|p| p.join_after).collect::<Vec<_>>(), [5]);
        assert!(q.drain_ready(4).is_empty());
        assert!(q.contains(&AgentId::from("c")));
    }

    #[test]
    fn nearest_on_empty_set_is_none() {
        let set = ActiveSet::new();
        assert!(set.nearest(loc(0.0, 0.0), loc(1.0, 1.0)).is_none());
    }

    #[test]
    fn nearest_prefers_strictly_smaller() {
        let mut set = ActiveSet::new();
        set.insert(AgentId::from("far"), loc(10.0, 0.0));
        set.insert(AgentId::from("near"), loc(1.0, 0.0));
        set.insert(AgentId::from("tie"), loc(-1.0, 0.0));
        let (slot, d) = set.nearest(loc(0.0, 0.0), loc(0.0, 0.0)).unwrap();
        assert_eq!(slot, 1);
        assert_eq!(d, 1.0);
    }

    #[test]
    fn move_to_updates_position() {
        let mut set = ActiveSet::from_agents(&[agent("A1", 0.0, 0.0)]);
        let id = set.move_to(0, loc(4.0, 4.0)).clone();
        assert_eq!(id.as_str(), "A1");
        assert_eq!(set.position(&id), Some(loc(4.0, 4.0)));
    }
}
