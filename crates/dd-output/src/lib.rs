//! `dd-output` — result aggregation and export for the rust_dd dispatcher.
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`aggregate`] | `group_by_agent`, `summarize`, `agent_summaries`         |
//! | [`report`]    | Serializable `Report` (the JSON output document)         |
//! | [`row`]       | Flat `AssignmentRow` / `AgentSummaryRow` for tabular use |
//! | [`csv`]       | `CsvWriter`, the [`OutputWriter`] CSV backend            |
//!
//! # Usage
//!
//! ```rust,ignore
//! use dd_output::{CsvWriter, OutputWriter, Report, group_by_agent};
//!
//! let groups = group_by_agent(&assignments, engine.agent_ids());
//! Report::new(&groups, warehouses.len(), packages.len()).write_json(Path::new("out.json"))?;
//!
//! let mut csv = CsvWriter::new(Some(Path::new("rows.csv")), None)?;
//! csv.write_assignments(&assignment_rows(&assignments, &warehouses, &packages)?)?;
//! csv.finish()?;
//! ```

pub mod aggregate;
pub mod csv;
pub mod error;
pub mod report;
pub mod row;
pub mod writer;


pub use aggregate::{AgentGroups, AgentSummary, Summary, agent_summaries, group_by_agent, summarize};
pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use report::{Report, ReportLine, Statistics};
pub use row::{AgentSummaryRow, AssignmentRow, assignment_rows};
pub use writer::OutputWriter;
