//! The JSON output document.
//!
//! ```json
//! {
//!   "total_distance": 123.45,
//!   "assignments": {
//!     "A1": [ { "package_id": "P1", "warehouse_id": "W1", "distance": 21.21, "delay": 0.0 } ],
//!     "A2": []
//!   },
//!   "statistics": {
//!     "total_packages": 1,
//!     "total_agents": 2,
//!     "total_warehouses": 1,
//!     "average_distance_per_package": 21.21
//!   }
//! }
//! ```
//!
//! Every number is rounded to two decimals.  `assignments` keeps group order.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::{AgentGroups, OutputResult};

/// One delivered package inside an agent's list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportLine {
    pub package_id:   String,
    pub warehouse_id: String,
    pub distance:     f64,
    pub delay:        f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    pub total_packages:               usize,
    pub total_agents:                 usize,
    pub total_warehouses:             usize,
    pub average_distance_per_package: f64,
}

/// The full run report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub total_distance: f64,
    #[serde(serialize_with = "ordered_map")]
    pub assignments:    Vec<(String, Vec<ReportLine>)>,
    pub statistics:     Statistics,
}

impl Report {
    /// Project grouped assignments into the report layout.
    ///
    /// `total_agents` counts every group, so dynamic agents are included.
    pub fn new(groups: &AgentGroups<'_>, warehouse_count: usize, package_count: usize) -> Self {
        let assignments: Vec<(String, Vec<ReportLine>)> = groups
            .iter()
            .map(|(agent, list)| {
                let lines = list
                    .iter()
                    .map(|a| ReportLine {
                        package_id:   a.package.to_string(),
                        warehouse_id: a.warehouse.to_string(),
                        distance:     round2(a.distance),
                        delay:        round2(a.delay),
                    })
                    .collect();
                (agent.to_string(), lines)
            })
            .collect();

        let total_distance: f64 = groups
            .iter()
            .flat_map(|(_, list)| list.iter().map(|a| a.distance))
            .sum();
        let average = if package_count == 0 {
            0.0
        } else {
            total_distance / package_count as f64
        };

        Self {
            total_distance: round2(total_distance),
            assignments,
            statistics: Statistics {
                total_packages:               package_count,
                total_agents:                 groups.len(),
                total_warehouses:             warehouse_count,
                average_distance_per_package: round2(average),
            },
        }
    }

    /// Lines for `agent`, if it appears in the report.
    pub fn lines_for(&self, agent: &str) -> Option<&[ReportLine]> {
        self.assignments
            .iter()
            .find(|(id, _)| id == agent)
            .map(|(_, lines)| lines.as_slice())
    }

    pub fn to_json_string(&self) -> OutputResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty-printed JSON to `path`, creating parent directories.
    pub fn write_json(&self, path: &Path) -> OutputResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut out = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut out, self)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

/// Round to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[allow(clippy::ptr_arg)]
fn ordered_map<S: Serializer>(
    entries:    &Vec<(String, Vec<ReportLine>)>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (agent, lines) in entries {
        map.serialize_entry(agent, lines)?;
    }
    map.end()
}
