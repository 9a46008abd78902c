//! `dd-core` — foundational types for the `rust_dd` delivery dispatcher.
//!
//! This crate is a dependency of every other `dd-*` crate.  It intentionally
//! has no `dd-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `PackageId`, `WarehouseId`                 |
//! | [`geo`]         | `Location`, `distance`, `trip_distance`               |
//! | [`model`]       | `Warehouse`, `Agent`, `Package`, `Assignment`         |
//! | [`rng`]         | `DelayRange`, `DelaySampler`, `DelayRng`              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!
//! With `serde`, `Location` round-trips through a two-element `[x, y]`.

pub mod error;
pub mod geo;
pub mod ids;
pub mod model;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Location, distance, trip_distance};
pub use ids::{AgentId, PackageId, WarehouseId};
pub use model::{Agent, Assignment, Package, Warehouse};
pub use rng::{DelayRange, DelayRng, DelaySampler};
