//! # optmodel
//!
//! A declarative front end for mathematical optimization models.
//!
//! Callers declare variables, constraints and an objective on a [`Model`],
//! then solve it through an explicit adapter for one solver family. The
//! numerical work is always delegated to a third-party solver:
//!
//! | Adapter | Models | Backend |
//! |---|---|---|
//! | [`LinearSolverAdapter`] | continuous LP | Clarabel |
//! | [`QuadraticSolverAdapter`] | convex QP | Clarabel |
//! | [`NonlinearSolverAdapter`] | convex QCQP | Clarabel (second-order cones) |
//! | [`IntegerSolverAdapter`] | MILP | HiGHS |
//!
//! ## Quick Start
//!
//! ```
//! use optmodel::prelude::*;
//!
//! let mut model = Model::new();
//! let x = model.add_variable(Domain::Continuous, 0.0, f64::INFINITY)?;
//! let y = model.add_variable(Domain::Continuous, 0.0, f64::INFINITY)?;
//! model.add_constraint(add(&var(&x), &var(&y)), "<=", 1.0)?;
//!
//! // minimize (x - 0.5)^2 + y = x^2 - x + y + 0.25
//! let objective = sum([
//!     &quadratic_term(&x, &x, 1.0),
//!     &linear(&x, -1.0),
//!     &linear(&y, 1.0),
//!     &constant(0.25),
//! ]);
//! model.set_objective(objective, Sense::Minimize)?;
//!
//! let solution = model.solve(&QuadraticSolverAdapter::new())?;
//! assert!((solution.objective_value() + 0.25).abs() < 1e-4);
//! assert!(solution.total_objective().abs() < 1e-4);
//! # Ok::<(), optmodel::OptError>(())
//! ```
//!
//! ## Objective constants
//!
//! Solvers only see the variable terms of the objective.
//! [`Solution::objective_value`] reports that optimized value and excludes the
//! expression's constant, which is available as
//! [`Solution::objective_constant`]. [`Solution::total_objective`] is the sum.
//!
//! ## Architecture
//!
//! - **Expressions** are immutable linear/quadratic value types built with
//!   plain functions (`linear`, `add`, `scale`, `quadratic_term`, ...)
//! - **Adapters** implement [`SolverAdapter`]: translate, execute, extract
//! - **Orchestration** moves a solve through `Built → Translating → Solving →
//!   Solved | Failed` without retries
//! - **Convexity** of quadratic terms is checked by eigen-decomposition before
//!   a continuous solver is called

pub mod constraints;
pub mod convexity;
pub mod error;
pub mod expr;
pub mod model;
pub mod solver;
pub mod sparse;

/// Prelude module for convenient imports.
///
/// ```
/// use optmodel::prelude::*;
/// ```
pub mod prelude {
    // Expressions
    pub use crate::expr::{
        add, constant, dot, linear, quadratic_term, scale, sub, sum, var, Bounds, Domain,
        Expression, Variable, VariableBuilder, VariableId,
    };

    // Constraints
    pub use crate::constraints::{Constraint, ConstraintId, Relation};

    // Model
    pub use crate::model::{Model, Objective, Sense};

    // Solver
    pub use crate::solver::{
        IntegerSolverAdapter, LinearSolverAdapter, NonlinearSolverAdapter,
        QuadraticSolverAdapter, Solution, SolveState, SolveStatus, SolverAdapter, SolverConfig,
    };

    // Errors
    pub use crate::error::{OptError, Result};
}

// Re-export main types at crate root
pub use constraints::{Constraint, ConstraintId, IntoRelation, Relation};
pub use error::{OptError, Result};
pub use expr::{Domain, Expression, Variable, VariableBuilder, VariableId};
pub use model::{Model, Objective, Sense};
pub use solver::{
    IntegerSolverAdapter, LinearSolverAdapter, NonlinearSolverAdapter, QuadraticSolverAdapter,
    Solution, SolveState, SolveStatus, SolverAdapter, SolverConfig,
};
