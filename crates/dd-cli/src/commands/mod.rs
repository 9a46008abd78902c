//! Command implementations for the `dispatch` CLI

pub mod check;
pub mod run;
pub mod visualize;

pub use self::run::RunArgs;

use anyhow::{Context, Result};
use dd_engine::{AssignmentEngine, EngineBuilder, EngineConfig};
use dd_input::ProblemInput;

/// Build an engine over a loaded problem.
pub(crate) fn build_engine(input: &ProblemInput, config: EngineConfig) -> Result<AssignmentEngine> {
    EngineBuilder::new(config)
        .warehouses(input.warehouses.iter().cloned())
        .agents(input.agents.iter().cloned())
        .packages(input.packages.iter().cloned())
        .build()
        .context("Invalid problem definition")
}
