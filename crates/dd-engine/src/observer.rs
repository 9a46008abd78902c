//! Engine observer trait for progress reporting.

use dd_core::{AgentId, Assignment};

/// Callbacks invoked by [`AssignmentEngine::solve_with`][crate::AssignmentEngine::solve_with]
/// at key points in the per-package loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — join announcer
///
/// ```rust,ignore
/// struct JoinPrinter;
///
/// impl EngineObserver for JoinPrinter {
///     fn on_agent_admitted(&mut self, agent: &AgentId, index: usize) {
///         println!("agent {agent} joined at package #{}", index + 1);
///     }
/// }
/// ```
pub trait EngineObserver {
    /// A dynamic agent entered the active set just before package `index`
    /// was processed.
    fn on_agent_admitted(&mut self, _agent: &AgentId, _index: usize) {}

    /// Called once per package, after the assignment is recorded.
    fn on_assignment(&mut self, _assignment: &Assignment) {}

    /// Called once after every package has been assigned.  Not called when
    /// the solve fails.
    fn on_solve_end(&mut self, _assignments: &[Assignment]) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
