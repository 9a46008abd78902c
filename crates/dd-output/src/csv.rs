//! CSV output backend.
//!
//! Up to two files, each optional:
//! - an assignment table, one row per delivered package
//! - an agent summary table, one row per agent, sorted by agent id
//!
//! Writes aimed at a table that was not configured are skipped.

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSummaryRow, AssignmentRow, OutputResult};

pub const ASSIGNMENT_HEADERS: [&str; 7] = [
    "Agent ID",
    "Package ID",
    "Warehouse ID",
    "Warehouse Location",
    "Destination",
    "Distance",
    "Delay (seconds)",
];

pub const SUMMARY_HEADERS: [&str; 5] = [
    "Agent ID",
    "Packages Delivered",
    "Total Distance",
    "Total Delay (seconds)",
    "Average Distance per Package",
];

/// Writes assignment and/or agent summary tables to CSV files.
pub struct CsvWriter {
    assignments: Option<Writer<File>>,
    summaries:   Option<Writer<File>>,
    finished:    bool,
}

impl CsvWriter {
    /// Create the requested files (and their parent directories) and write
    /// the header rows.
    pub fn new(assignments: Option<&Path>, summaries: Option<&Path>) -> OutputResult<Self> {
        let assignments = assignments
            .map(|p| open_with_header(p, &ASSIGNMENT_HEADERS))
            .transpose()?;
        let summaries = summaries
            .map(|p| open_with_header(p, &SUMMARY_HEADERS))
            .transpose()?;

        Ok(Self {
            assignments,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_assignments(&mut self, rows: &[AssignmentRow]) -> OutputResult<()> {
        let Some(w) = self.assignments.as_mut() else {
            return Ok(());
        };
        for row in rows {
            w.write_record(&[
                row.agent_id.clone(),
                row.package_id.clone(),
                row.warehouse_id.clone(),
                row.warehouse_location.to_string(),
                row.destination.to_string(),
                format!("{:.2}", row.distance),
                format!("{:.2}", row.delay),
            ])?;
        }
        Ok(())
    }

    fn write_agent_summaries(&mut self, rows: &[AgentSummaryRow]) -> OutputResult<()> {
        let Some(w) = self.summaries.as_mut() else {
            return Ok(());
        };
        let mut sorted: Vec<&AgentSummaryRow> = rows.iter().collect();
        sorted.sort_by(|a, b| a.agent_id.cmp(&b.agent_id));
        for row in sorted {
            w.write_record(&[
                row.agent_id.clone(),
                row.packages.to_string(),
                format!("{:.2}", row.total_distance),
                format!("{:.2}", row.total_delay),
                format!("{:.2}", row.average_distance),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if let Some(w) = self.assignments.as_mut() {
            w.flush()?;
        }
        if let Some(w) = self.summaries.as_mut() {
            w.flush()?;
        }
        Ok(())
    }
}

fn open_with_header(path: &Path, headers: &[&str]) -> OutputResult<Writer<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut w = Writer::from_path(path)?;
    w.write_record(headers)?;
    Ok(w)
}
