//! Plain data row types written by output backends.

use std::collections::HashMap;

use dd_core::{Assignment, Location, Package, PackageId, Warehouse, WarehouseId};

use crate::{AgentSummary, OutputError, OutputResult};

/// One assignment, with the coordinates needed for a flat table.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRow {
    pub agent_id:           String,
    pub package_id:         String,
    pub warehouse_id:       String,
    pub warehouse_location: Location,
    pub destination:        Location,
    pub distance:           f64,
    pub delay:              f64,
}

/// Totals for one agent.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSummaryRow {
    pub agent_id:         String,
    pub packages:         usize,
    pub total_distance:   f64,
    pub total_delay:      f64,
    pub average_distance: f64,
}

impl From<&AgentSummary> for AgentSummaryRow {
    fn from(s: &AgentSummary) -> Self {
        Self {
            agent_id:         s.agent.to_string(),
            packages:         s.packages,
            total_distance:   s.total_distance,
            total_delay:      s.total_delay,
            average_distance: s.average_distance,
        }
    }
}

/// Join each assignment with its warehouse and package coordinates.
///
/// Fails if an assignment names a warehouse or package not in the inputs.
pub fn assignment_rows(
    assignments: &[Assignment],
    warehouses:  &[Warehouse],
    packages:    &[Package],
) -> OutputResult<Vec<AssignmentRow>> {
    let warehouse_at: HashMap<&WarehouseId, Location> =
        warehouses.iter().map(|w| (&w.id, w.location)).collect();
    let destination_of: HashMap<&PackageId, Location> =
        packages.iter().map(|p| (&p.id, p.destination)).collect();

    assignments
        .iter()
        .map(|a| {
            let warehouse_location = *warehouse_at
                .get(&a.warehouse)
                .ok_or_else(|| OutputError::UnknownWarehouse(a.warehouse.clone()))?;
            let destination = *destination_of
                .get(&a.package)
                .ok_or_else(|| OutputError::UnknownPackage(a.package.clone()))?;
            Ok(AssignmentRow {
                agent_id:     a.agent.to_string(),
                package_id:   a.package.to_string(),
                warehouse_id: a.warehouse.to_string(),
                warehouse_location,
                destination,
                distance:     a.distance,
                delay:        a.delay,
            })
        })
        .collect()
}
