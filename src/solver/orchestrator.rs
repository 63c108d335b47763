//! Solve orchestration.
//!
//! A solve moves through `Built → Translating → Solving → Solved`, or ends in
//! `Failed` from either intermediate state. There are no retries: the first
//! error is returned to the caller, who may pick a different adapter and solve
//! again.

use std::fmt;
use std::time::Instant;

use crate::error::{OptError, Result};
use crate::model::Model;

use super::{Solution, SolverAdapter};

/// State of a model with respect to solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolveState {
    /// Modified since the last solve, or never solved.
    #[default]
    Built,
    /// Adapter is translating the model.
    Translating,
    /// External solver is running.
    Solving,
    /// Solve succeeded; the model holds a solution.
    Solved,
    /// Last solve failed.
    Failed,
}

impl SolveState {
    pub fn as_str(self) -> &'static str {
        match self {
            SolveState::Built => "built",
            SolveState::Translating => "translating",
            SolveState::Solving => "solving",
            SolveState::Solved => "solved",
            SolveState::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SolveState::Solved | SolveState::Failed)
    }
}

impl fmt::Display for SolveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drives one adapter through one solve.
///
/// `run` consumes the orchestrator, so a finished orchestration cannot be
/// resumed.
pub struct SolveOrchestrator<'a, A: SolverAdapter> {
    adapter: &'a A,
    state: SolveState,
}

impl<'a, A: SolverAdapter> SolveOrchestrator<'a, A> {
    pub fn new(adapter: &'a A) -> Self {
        Self {
            adapter,
            state: SolveState::Built,
        }
    }

    /// Translate, solve and extract. Returns the terminal state with the result.
    pub fn run(mut self, model: &Model) -> (SolveState, Result<Solution>) {
        let started = Instant::now();

        self.transition(SolveState::Translating);
        let input = match self.adapter.translate_model(model) {
            Ok(input) => input,
            Err(err) => return self.fail(err),
        };

        self.transition(SolveState::Solving);
        let solution = match self
            .adapter
            .execute(input)
            .and_then(|output| self.adapter.extract_solution(output))
        {
            Ok(solution) => solution,
            Err(err) => return self.fail(err),
        };

        self.transition(SolveState::Solved);
        tracing::info!(
            component = "orchestrator",
            operation = "solve",
            status = "success",
            adapter = self.adapter.name(),
            objective = solution.total_objective(),
            variables = model.variables().len(),
            constraints = model.constraints().len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Model solved"
        );
        (self.state, Ok(solution))
    }

    fn transition(&mut self, next: SolveState) {
        tracing::debug!(
            component = "orchestrator",
            adapter = self.adapter.name(),
            from = self.state.as_str(),
            to = next.as_str(),
            "Solve state transition"
        );
        self.state = next;
    }

    fn fail(mut self, err: OptError) -> (SolveState, Result<Solution>) {
        let during = self.state;
        self.transition(SolveState::Failed);
        tracing::warn!(
            component = "orchestrator",
            operation = "solve",
            status = "error",
            adapter = self.adapter.name(),
            during = during.as_str(),
            error_code = err.code(),
            error = %err,
            "Solve failed"
        );
        (self.state, Err(err))
    }
}
