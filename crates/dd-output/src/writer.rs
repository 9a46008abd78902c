//! The `OutputWriter` trait implemented by tabular backends.

use crate::{AgentSummaryRow, AssignmentRow, OutputResult};

/// Trait implemented by tabular writers (currently CSV).
pub trait OutputWriter {
    /// Write a batch of per-assignment rows.
    fn write_assignments(&mut self, rows: &[AssignmentRow]) -> OutputResult<()>;

    /// Write one row per agent.
    fn write_agent_summaries(&mut self, rows: &[AgentSummaryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
