//! Error types for optmodel.

use thiserror::Error;

use crate::expr::VariableId;
use crate::solver::SolveStatus;

/// Error type for model building and solving.
#[derive(Debug, Clone, Error)]
pub enum OptError {
    /// Variable bounds are malformed (lower > upper, or NaN).
    #[error("Invalid variable bounds: lower ({lower}) > upper ({upper})")]
    InvalidBounds { lower: f64, upper: f64 },

    /// Solve attempted before an objective was set.
    #[error("Model has no objective")]
    NoObjective,

    /// Constraint operator is not one of `<=`, `>=`, `==`.
    #[error("Unsupported constraint operator: {0:?}")]
    UnsupportedOperator(String),

    /// The chosen adapter's solver cannot express a construct in the model.
    #[error("{adapter} cannot express this model: {reason}")]
    UnsupportedModel {
        adapter: &'static str,
        reason: String,
    },

    /// The external solver ran but did not produce an optimal solution.
    #[error("{solver} failed ({status}): {message}")]
    SolverFailure {
        solver: &'static str,
        status: SolveStatus,
        message: String,
    },

    /// No solution is available (never solved, or invalidated by a modification).
    #[error("Model has no solution")]
    NoSolution,

    /// Expression references a variable the model does not own.
    #[error("Variable {0} does not belong to this model")]
    UnknownVariable(VariableId),

    /// A variable with this name already exists in the model.
    #[error("Variable name {0:?} is already in use")]
    DuplicateName(String),

    /// Non-finite coefficient or right-hand side.
    #[error("Invalid coefficient: {0}")]
    InvalidCoefficient(String),
}

impl OptError {
    /// Returns a stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            OptError::InvalidBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            OptError::NoObjective => "OBJECTIVE_MISSING",
            OptError::UnsupportedOperator(_) => "CONSTRAINT_UNSUPPORTED_OPERATOR",
            OptError::UnsupportedModel { .. } => "MODEL_UNSUPPORTED",
            OptError::SolverFailure { .. } => "SOLVER_FAILURE",
            OptError::NoSolution => "SOLUTION_MISSING",
            OptError::UnknownVariable(_) => "VARIABLE_UNKNOWN",
            OptError::DuplicateName(_) => "VARIABLE_DUPLICATE_NAME",
            OptError::InvalidCoefficient(_) => "COEFFICIENT_INVALID",
        }
    }

    pub(crate) fn unsupported(adapter: &'static str, reason: impl Into<String>) -> Self {
        OptError::UnsupportedModel {
            adapter,
            reason: reason.into(),
        }
    }
}

/// Result type for optmodel operations.
pub type Result<T> = std::result::Result<T, OptError>;
