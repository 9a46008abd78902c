//! Immutable entity records.
//!
//! Agents carry only their *starting* position.  Where an agent is during a
//! run is engine state (see `dd-engine`), never a mutation of the record.

use crate::{AgentId, Location, PackageId, WarehouseId};

/// A pickup point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Warehouse {
    pub id:       WarehouseId,
    pub location: Location,
}

impl Warehouse {
    pub fn new(id: impl Into<WarehouseId>, location: Location) -> Self {
        Self { id: id.into(), location }
    }
}

/// A delivery agent and the position it starts from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:       AgentId,
    pub location: Location,
}

impl Agent {
    pub fn new(id: impl Into<AgentId>, location: Location) -> Self {
        Self { id: id.into(), location }
    }
}

/// A package waiting at `warehouse` to be carried to `destination`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Package {
    pub id:          PackageId,
    pub warehouse:   WarehouseId,
    pub destination: Location,
}

impl Package {
    pub fn new(
        id:          impl Into<PackageId>,
        warehouse:   impl Into<WarehouseId>,
        destination: Location,
    ) -> Self {
        Self {
            id:        id.into(),
            warehouse: warehouse.into(),
            destination,
        }
    }
}

/// The binding of one package to the agent that delivers it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub agent:     AgentId,
    pub package:   PackageId,
    pub warehouse: WarehouseId,
    /// Agent position → warehouse → destination.  Always ≥ 0.
    pub distance:  f64,
    /// Simulated delivery delay in seconds; 0 when delays are disabled.
    pub delay:     f64,
    /// Zero-based position of the package in the input ordering.
    pub sequence:  usize,
}
