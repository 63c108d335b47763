//! Convex nonlinear (quadratically constrained) adapter.
//!
//! Nonlinear models are limited to what the expression type can state:
//! quadratic objectives and quadratic inequality constraints. Convex ones are
//! solved exactly as second-order cone programs.

use super::adapter::{
    reject_empty, reject_integral, require_convex_constraints, require_convex_objective,
    require_objective, SolverAdapter,
};
use super::clarabel::{self, ConicOutput};
use super::config::SolverConfig;
use super::stuffing::{stuff_model, StuffedProblem};
use super::Solution;
use crate::error::Result;
use crate::model::Model;

/// Solves convex QCQPs with Clarabel's second-order cone support.
#[derive(Debug, Clone, Default)]
pub struct NonlinearSolverAdapter {
    config: SolverConfig,
}

impl NonlinearSolverAdapter {
    const NAME: &'static str = "nonlinear";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

impl SolverAdapter for NonlinearSolverAdapter {
    type Input = StuffedProblem;
    type Output = ConicOutput;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn translate_model(&self, model: &Model) -> Result<StuffedProblem> {
        let objective = require_objective(model)?;
        reject_empty(Self::NAME, model)?;
        reject_integral(Self::NAME, model)?;
        require_convex_objective(Self::NAME, objective)?;
        require_convex_constraints(Self::NAME, model)?;
        stuff_model(Self::NAME, model, objective)
    }

    fn execute(&self, input: StuffedProblem) -> Result<ConicOutput> {
        clarabel::solve(Self::NAME, input, &self.config)
    }

    fn extract_solution(&self, output: ConicOutput) -> Result<Solution> {
        clarabel::extract(Self::NAME, output)
    }
}
