//! Model definition and solving API.
//!
//! A [`Model`] owns its variables, constraints and objective. It is solved by
//! passing an adapter for the solver family of choice:
//!
//! ```
//! use optmodel::prelude::*;
//!
//! let mut model = Model::new();
//! let x = model.add_variable(Domain::Continuous, 0.0, f64::INFINITY)?;
//! let y = model.add_variable(Domain::Continuous, 0.0, f64::INFINITY)?;
//! let total = add(&linear(&x, 1.0), &linear(&y, 1.0));
//! model.add_constraint(total.clone(), "<=", 1.0)?;
//! model.set_objective(total, Sense::Minimize)?;
//!
//! let solution = model.solve(&LinearSolverAdapter::new())?;
//! assert!(solution.status().is_optimal());
//! # Ok::<(), optmodel::OptError>(())
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::constraints::{Constraint, ConstraintId, IntoRelation};
use crate::error::{OptError, Result};
use crate::expr::{Domain, Expression, Variable, VariableBuilder, VariableId};
use crate::solver::lp_format::write_lp;
use crate::solver::{SolveOrchestrator, SolveState, Solution, SolverAdapter};

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Objective of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    expr: Expression,
    sense: Sense,
}

impl Objective {
    /// Get the expression being optimized.
    pub fn expression(&self) -> &Expression {
        &self.expr
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }
}

/// An optimization model.
#[derive(Debug, Clone, Default)]
pub struct Model {
    variables: Vec<Variable>,
    index: HashMap<VariableId, usize>,
    names: HashMap<String, usize>,
    constraints: Vec<Constraint>,
    objective: Option<Objective>,
    solution: Option<Solution>,
    state: SolveState,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable with the given domain and bounds. Infinite bounds are
    /// allowed.
    ///
    /// # Errors
    ///
    /// `InvalidBounds` if `lower > upper`, either bound is NaN, `lower` is
    /// `+inf` or `upper` is `-inf`.
    pub fn add_variable(&mut self, domain: Domain, lower: f64, upper: f64) -> Result<Variable> {
        self.add_variable_with(VariableBuilder::new().domain(domain).bounds(lower, upper))
    }

    /// Add a variable described by a builder. Unnamed variables are called
    /// `x{n}`.
    ///
    /// # Errors
    ///
    /// `InvalidBounds` as for [`add_variable`](Self::add_variable), and
    /// `DuplicateName` if another variable already has the requested name.
    pub fn add_variable_with(&mut self, builder: VariableBuilder) -> Result<Variable> {
        let bounds = builder.bounds;
        if !bounds.is_valid() {
            return Err(OptError::InvalidBounds {
                lower: bounds.lower,
                upper: bounds.upper,
            });
        }

        let name = match builder.name {
            Some(name) => {
                if self.names.contains_key(&name) {
                    return Err(OptError::DuplicateName(name));
                }
                name
            }
            None => self.default_name(),
        };

        let var = Variable {
            id: VariableId::next(),
            name,
            domain: builder.domain,
            bounds,
        };
        let pos = self.variables.len();
        self.index.insert(var.id, pos);
        self.names.insert(var.name.clone(), pos);
        self.variables.push(var.clone());

        tracing::debug!(
            component = "model",
            operation = "add_variable",
            variable = %var.name,
            domain = var.domain.as_str(),
            lower = bounds.lower,
            upper = bounds.upper,
            "Variable added"
        );
        self.invalidate();
        Ok(var)
    }

    fn default_name(&self) -> String {
        let mut n = self.variables.len();
        loop {
            let candidate = format!("x{n}");
            if !self.names.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Add the constraint `expression <op> rhs`.
    ///
    /// The operator may be a [`Relation`](crate::Relation) or one of the
    /// strings `"<="`, `">="`, `"=="`.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperator` for any other operator, `UnknownVariable` if the
    /// expression uses a variable of another model, and `InvalidCoefficient`
    /// for non-finite coefficients or right-hand side.
    pub fn add_constraint(
        &mut self,
        expression: Expression,
        operator: impl IntoRelation,
        rhs: f64,
    ) -> Result<ConstraintId> {
        let relation = operator.into_relation()?;
        self.check_expression(&expression)?;
        if !rhs.is_finite() {
            return Err(OptError::InvalidCoefficient(format!(
                "right-hand side must be finite, got {rhs}"
            )));
        }

        let id = ConstraintId(self.constraints.len());
        tracing::debug!(
            component = "model",
            operation = "add_constraint",
            constraint = id.index(),
            relation = relation.as_str(),
            rhs,
            degree = expression.degree(),
            "Constraint added"
        );
        self.constraints.push(Constraint {
            id,
            expr: expression,
            relation,
            rhs,
        });
        self.invalidate();
        Ok(id)
    }

    /// Set the objective, replacing any previous one.
    pub fn set_objective(&mut self, expression: Expression, sense: Sense) -> Result<()> {
        self.check_expression(&expression)?;
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            sense = sense.as_str(),
            degree = expression.degree(),
            "Objective set"
        );
        self.objective = Some(Objective {
            expr: expression,
            sense,
        });
        self.invalidate();
        Ok(())
    }

    fn check_expression(&self, expression: &Expression) -> Result<()> {
        if let Some(id) = expression
            .variables()
            .into_iter()
            .find(|id| !self.index.contains_key(id))
        {
            return Err(OptError::UnknownVariable(id));
        }
        if !expression.is_finite() {
            return Err(OptError::InvalidCoefficient(
                "expression has a non-finite coefficient".into(),
            ));
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        if self.solution.take().is_some() || self.state != SolveState::Built {
            tracing::debug!(
                component = "model",
                operation = "invalidate",
                previous_state = self.state.as_str(),
                "Model modified; solution discarded"
            );
        }
        self.state = SolveState::Built;
    }

    /// Solve the model with the given adapter.
    ///
    /// On success the solution is stored on the model and returned. On
    /// failure the model enters [`SolveState::Failed`] and a previous
    /// solution, if any, is kept.
    ///
    /// # Errors
    ///
    /// `NoObjective` if no objective is set; otherwise whatever the adapter
    /// reports (`UnsupportedModel`, `SolverFailure`).
    pub fn solve<A: SolverAdapter>(&mut self, adapter: &A) -> Result<&Solution> {
        if self.objective.is_none() {
            return Err(OptError::NoObjective);
        }
        let (state, result) = SolveOrchestrator::new(adapter).run(self);
        self.state = state;
        let solution = result?;
        Ok(self.solution.insert(solution))
    }

    /// The current solution.
    ///
    /// # Errors
    ///
    /// `NoSolution` before the first successful solve or after a modification.
    pub fn solution(&self) -> Result<&Solution> {
        self.solution.as_ref().ok_or(OptError::NoSolution)
    }

    /// Value of a variable in the current solution.
    pub fn value(&self, var: &Variable) -> Result<f64> {
        self.solution()?
            .value(var)
            .ok_or(OptError::UnknownVariable(var.id()))
    }

    pub fn state(&self) -> SolveState {
        self.state
    }

    /// Variables in insertion order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VariableId) -> Option<&Variable> {
        self.index.get(&id).map(|&pos| &self.variables[pos])
    }

    pub fn variable_by_name(&self, name: &str) -> Option<&Variable> {
        self.names.get(name).map(|&pos| &self.variables[pos])
    }

    /// Constraints in insertion order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.get(id.index())
    }

    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }
}

impl fmt::Display for Model {
    /// CPLEX LP rendering using the variables' names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lp(f, self)
    }
}
