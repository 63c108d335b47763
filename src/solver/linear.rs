//! Linear programming adapter.

use super::adapter::{
    reject_empty, reject_integral, reject_quadratic_constraints, reject_quadratic_objective,
    require_objective, SolverAdapter,
};
use super::clarabel::{self, ConicOutput};
use super::config::SolverConfig;
use super::stuffing::{stuff_model, StuffedProblem};
use super::Solution;
use crate::error::Result;
use crate::model::Model;

/// Solves continuous linear programs with Clarabel.
///
/// Rejects integer and binary variables and any quadratic term.
#[derive(Debug, Clone, Default)]
pub struct LinearSolverAdapter {
    config: SolverConfig,
}

impl LinearSolverAdapter {
    const NAME: &'static str = "linear";

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

impl SolverAdapter for LinearSolverAdapter {
    type Input = StuffedProblem;
    type Output = ConicOutput;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn translate_model(&self, model: &Model) -> Result<StuffedProblem> {
        let objective = require_objective(model)?;
        reject_empty(Self::NAME, model)?;
        reject_integral(Self::NAME, model)?;
        reject_quadratic_objective(Self::NAME, objective)?;
        reject_quadratic_constraints(Self::NAME, model)?;
        stuff_model(Self::NAME, model, objective)
    }

    fn execute(&self, input: StuffedProblem) -> Result<ConicOutput> {
        clarabel::solve(Self::NAME, input, &self.config)
    }

    fn extract_solution(&self, output: ConicOutput) -> Result<Solution> {
        clarabel::extract(Self::NAME, output)
    }
}
