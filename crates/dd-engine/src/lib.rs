//! `dd-engine` — greedy delivery assignment for the rust_dd dispatcher.
//!
//! # Per-package loop
//!
//! ```text
//! for (i, package) in packages:
//!   ① Admit    — pending dynamic agents with join_after <= i enter the
//!                active set, in registration order.
//!   ② Resolve  — look up the package's warehouse (missing → error).
//!   ③ Select   — scan active agents; smallest trip distance wins,
//!                ties go to the earliest agent in active-set order.
//!   ④ Delay    — draw from the DelaySampler when delays are enabled.
//!   ⑤ Record   — push Assignment { .., sequence: i }.
//!   ⑥ Move     — the chosen agent now stands at the package destination.
//! ```
//!
//! Active-set order is the initial agents in the order they were supplied,
//! followed by dynamic agents in the order they were admitted.
//!
//! # Quick-start
//!
//! ```rust
//! use dd_core::{Agent, Location, Package, Warehouse};
//! use dd_engine::{EngineBuilder, EngineConfig};
//!
//! let mut engine = EngineBuilder::new(EngineConfig::default())
//!     .warehouses([Warehouse::new("W1", Location::new(3.0, 0.0))])
//!     .agents([Agent::new("A1", Location::new(0.0, 0.0))])
//!     .packages([Package::new("P1", "W1", Location::new(3.0, 4.0))])
//!     .build()
//!     .unwrap();
//!
//! let assignments = engine.solve().unwrap();
//! assert_eq!(assignments[0].distance, 7.0);
//! ```

pub mod active;
pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod observer;
pub mod pending;

#[cfg(test)]
mod tests;

pub use active::ActiveSet;
pub use builder::EngineBuilder;
pub use config::EngineConfig;
pub use engine::{AssignmentEngine, Registration, RegistrationWarning};
pub use error::{EngineError, EngineResult};
pub use observer::{EngineObserver, NoopObserver};
pub use pending::{PendingAgent, PendingQueue};
