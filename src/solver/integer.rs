//! Mixed-integer adapter backed by HiGHS.
//!
//! Columns, rows and integrality are handed to HiGHS through the `highs`
//! crate's [`RowProblem`]; branch and bound runs in process.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::time::Instant;

use highs::{Col, HighsModelStatus, RowProblem, Sense as HighsSense};

use super::adapter::{
    reject_empty, reject_quadratic_constraints, reject_quadratic_objective, require_objective,
    SolverAdapter,
};
use super::config::SolverConfig;
use super::{SolveStatus, Solution};
use crate::constraints::Relation;
use crate::error::{OptError, Result};
use crate::expr::{Expression, VariableId};
use crate::model::{Model, Sense};

const NAME: &str = "integer";

impl From<HighsModelStatus> for SolveStatus {
    fn from(status: HighsModelStatus) -> Self {
        match status {
            HighsModelStatus::Optimal => SolveStatus::Optimal,
            HighsModelStatus::Infeasible => SolveStatus::Infeasible,
            HighsModelStatus::Unbounded => SolveStatus::Unbounded,
            HighsModelStatus::ReachedTimeLimit => SolveStatus::TimeLimit,
            HighsModelStatus::ReachedIterationLimit => SolveStatus::IterationLimit,
            _ => SolveStatus::Unknown,
        }
    }
}

/// Column of the HiGHS problem for one model variable.
#[derive(Debug, Clone, Copy)]
struct Column {
    id: VariableId,
    integral: bool,
}

/// Translated model, ready to hand to HiGHS.
#[derive(Debug)]
pub struct IntegerInput {
    problem: RowProblem,
    sense: Sense,
    columns: Vec<Column>,
    objective: Expression,
}

/// Result of one HiGHS run.
#[derive(Debug, Clone)]
pub struct IntegerOutput {
    pub status: HighsModelStatus,
    /// Column values; empty when HiGHS reported no solution.
    pub values: Vec<f64>,
    pub solve_time: f64,
    columns: Vec<Column>,
    objective: Expression,
}

/// Solves linear models with integer, binary and continuous variables using
/// HiGHS.
///
/// Quadratic terms are rejected. Binary variables are bounded to `[0, 1]`.
#[derive(Debug, Clone, Default)]
pub struct IntegerSolverAdapter {
    config: SolverConfig,
}

impl IntegerSolverAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        IntegerSolverAdapter { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

fn column_range(lower: f64, upper: f64) -> RangeInclusive<f64> {
    lower..=upper
}

impl SolverAdapter for IntegerSolverAdapter {
    type Input = IntegerInput;
    type Output = IntegerOutput;

    fn name(&self) -> &'static str {
        NAME
    }

    fn translate_model(&self, model: &Model) -> Result<IntegerInput> {
        let objective = require_objective(model)?;
        reject_empty(NAME, model)?;
        reject_quadratic_objective(NAME, objective)?;
        reject_quadratic_constraints(NAME, model)?;

        let expr = objective.expression();
        let mut problem = RowProblem::default();
        let mut cols: HashMap<VariableId, Col> = HashMap::with_capacity(model.variables().len());
        let mut columns = Vec::with_capacity(model.variables().len());
        for var in model.variables() {
            let b = var.bounds().effective(var.domain());
            let cost = expr.coefficient(var.id());
            let col = if var.is_integral() {
                problem.add_integer_column(cost, column_range(b.lower, b.upper))
            } else {
                problem.add_column(cost, column_range(b.lower, b.upper))
            };
            cols.insert(var.id(), col);
            columns.push(Column {
                id: var.id(),
                integral: var.is_integral(),
            });
        }

        for constraint in model.constraints() {
            let (lhs, rhs) = constraint.normalized();
            let factors = lhs
                .linear_terms()
                .map(|(id, coeff)| {
                    cols.get(&id)
                        .map(|col| (*col, coeff))
                        .ok_or(OptError::UnknownVariable(id))
                })
                .collect::<Result<Vec<_>>>()?;
            match constraint.relation() {
                Relation::LessEqual => {
                    problem.add_row(..=rhs, factors);
                }
                Relation::GreaterEqual => {
                    problem.add_row(rhs.., factors);
                }
                Relation::Equal => {
                    problem.add_row(rhs..=rhs, factors);
                }
            }
        }

        tracing::debug!(
            component = "highs",
            operation = "translate",
            columns = columns.len(),
            rows = problem.num_rows(),
            integral = columns.iter().filter(|c| c.integral).count(),
            "Model translated"
        );

        Ok(IntegerInput {
            problem,
            sense: objective.sense(),
            columns,
            objective: expr.clone(),
        })
    }

    fn execute(&self, input: IntegerInput) -> Result<IntegerOutput> {
        let sense = match input.sense {
            Sense::Minimize => HighsSense::Minimise,
            Sense::Maximize => HighsSense::Maximise,
        };
        let mut model = input.problem.optimise(sense);
        if self.config.verbose != Some(true) {
            model.make_quiet();
        }
        if let Some(seconds) = self.config.time_limit {
            model.set_option("time_limit", seconds);
        }
        if let Some(gap) = self.config.mip_gap {
            model.set_option("mip_rel_gap", gap);
        }
        if let Some(tol) = self.config.tolerance {
            model.set_option("mip_feasibility_tolerance", tol);
            model.set_option("primal_feasibility_tolerance", tol);
        }
        if let Some(iterations) = self.config.max_iter {
            model.set_option("simplex_iteration_limit", saturating_int(iterations));
        }
        if let Some(threads) = self.config.threads {
            model.set_option("threads", saturating_int(threads));
        }

        let started = Instant::now();
        let solved = model.try_solve().map_err(|status| OptError::SolverFailure {
            solver: NAME,
            status: SolveStatus::Unknown,
            message: format!("highs run failed: {status:?}"),
        })?;
        let solve_time = started.elapsed().as_secs_f64();

        let status = solved.status();
        let values = if has_solution(status) {
            solved.get_solution().columns().to_vec()
        } else {
            Vec::new()
        };
        tracing::debug!(
            component = "highs",
            operation = "execute",
            raw_status = ?status,
            columns = input.columns.len(),
            solve_time,
            "HiGHS finished"
        );

        Ok(IntegerOutput {
            status,
            values,
            solve_time,
            columns: input.columns,
            objective: input.objective,
        })
    }

    fn extract_solution(&self, output: IntegerOutput) -> Result<Solution> {
        let status = SolveStatus::from(output.status);
        if !status.is_optimal() {
            return Err(OptError::SolverFailure {
                solver: NAME,
                status,
                message: format!("highs returned {:?}", output.status),
            });
        }
        if output.values.len() != output.columns.len() {
            return Err(OptError::SolverFailure {
                solver: NAME,
                status: SolveStatus::Unknown,
                message: format!(
                    "highs returned {} column values for {} columns",
                    output.values.len(),
                    output.columns.len()
                ),
            });
        }

        // Integral columns come back within the MIP feasibility tolerance.
        let values: HashMap<VariableId, f64> = output
            .columns
            .iter()
            .zip(&output.values)
            .map(|(col, v)| (col.id, if col.integral { v.round() } else { *v }))
            .collect();
        let objective_value = output
            .objective
            .without_constant()
            .evaluate(&values)
            .ok_or_else(|| OptError::SolverFailure {
                solver: NAME,
                status: SolveStatus::Unknown,
                message: "objective references an unsolved variable".into(),
            })?;

        let mut solution = Solution::new(NAME, SolveStatus::Optimal);
        solution.objective_value = objective_value;
        solution.objective_constant = output.objective.constant();
        solution.values = values.into_iter().collect();
        solution.solve_time = output.solve_time;
        Ok(solution)
    }
}

fn has_solution(status: HighsModelStatus) -> bool {
    matches!(
        status,
        HighsModelStatus::Optimal
            | HighsModelStatus::ReachedTimeLimit
            | HighsModelStatus::ReachedIterationLimit
    )
}

fn saturating_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
