//! Solve status and the solution surfaced on a model.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::expr::{Variable, VariableId};

/// Solution status reported by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// Optimal solution found.
    Optimal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Maximum iterations reached.
    IterationLimit,
    /// Time limit reached.
    TimeLimit,
    /// Numerical difficulties.
    NumericalError,
    /// Solver process failed or status could not be determined.
    Unknown,
}

impl SolveStatus {
    pub fn is_optimal(self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::IterationLimit => "iteration_limit",
            SolveStatus::TimeLimit => "time_limit",
            SolveStatus::NumericalError => "numerical_error",
            SolveStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful solve.
///
/// `objective_value` is the value the solver optimized, which never includes
/// the objective's constant offset: solvers only see the variable terms. The
/// offset is kept in `objective_constant` and [`Solution::total_objective`]
/// adds the two.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub(crate) status: SolveStatus,
    pub(crate) objective_value: f64,
    pub(crate) objective_constant: f64,
    pub(crate) values: BTreeMap<VariableId, f64>,
    pub(crate) solver: &'static str,
    pub(crate) solve_time: f64,
    pub(crate) iterations: Option<u32>,
}

impl Solution {
    pub(crate) fn new(solver: &'static str, status: SolveStatus) -> Self {
        Solution {
            status,
            objective_value: 0.0,
            objective_constant: 0.0,
            values: BTreeMap::new(),
            solver,
            solve_time: 0.0,
            iterations: None,
        }
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Objective value excluding the constant offset.
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Constant offset of the objective expression.
    pub fn objective_constant(&self) -> f64 {
        self.objective_constant
    }

    /// Objective value including the constant offset.
    pub fn total_objective(&self) -> f64 {
        self.objective_value + self.objective_constant
    }

    /// Value assigned to a variable.
    pub fn value(&self, var: &Variable) -> Option<f64> {
        self.value_of(var.id())
    }

    pub fn value_of(&self, id: VariableId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    /// All assigned values in variable order.
    pub fn values(&self) -> impl Iterator<Item = (VariableId, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// Values as a hash map, for expression evaluation.
    pub fn value_map(&self) -> HashMap<VariableId, f64> {
        self.values.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Name of the solver that produced this solution.
    pub fn solver(&self) -> &'static str {
        self.solver
    }

    /// Wall-clock solve time in seconds.
    pub fn solve_time(&self) -> f64 {
        self.solve_time
    }

    /// Solver iterations, when the solver reports them.
    pub fn iterations(&self) -> Option<u32> {
        self.iterations
    }
}
