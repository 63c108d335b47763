//! The solver adapter boundary.

use crate::constraints::Relation;
use crate::convexity::{curvature, Curvature};
use crate::error::{OptError, Result};
use crate::model::{Model, Objective, Sense};

use super::Solution;

/// Translation layer between a [`Model`] and one external solver.
///
/// A solve is `translate_model` → `execute` → `extract_solution`. Everything a
/// solver cannot express must be rejected by `translate_model`, before the
/// external solver is invoked. The numeric work happens entirely inside
/// `execute`, which treats the solver as a black box.
pub trait SolverAdapter {
    /// Solver-specific input produced from a model.
    type Input;
    /// Raw solver result, before interpretation.
    type Output;

    /// Short adapter name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Translate the model into solver input.
    ///
    /// # Errors
    ///
    /// `UnsupportedModel` when the model uses a construct the target solver
    /// cannot express.
    fn translate_model(&self, model: &Model) -> Result<Self::Input>;

    /// Run the external solver.
    fn execute(&self, input: Self::Input) -> Result<Self::Output>;

    /// Interpret the solver's result.
    ///
    /// # Errors
    ///
    /// `SolverFailure` carrying the raw solver status when the solver reports
    /// infeasibility, unboundedness, numerical failure or a nonzero exit.
    fn extract_solution(&self, output: Self::Output) -> Result<Solution>;
}

/// The model's objective, or `NoObjective`.
pub(crate) fn require_objective(model: &Model) -> Result<&Objective> {
    model.objective().ok_or(OptError::NoObjective)
}

pub(crate) fn reject_empty(adapter: &'static str, model: &Model) -> Result<()> {
    if model.variables().is_empty() {
        return Err(OptError::unsupported(adapter, "model has no variables"));
    }
    Ok(())
}

pub(crate) fn reject_integral(adapter: &'static str, model: &Model) -> Result<()> {
    match model.variables().iter().find(|v| v.is_integral()) {
        Some(v) => Err(OptError::unsupported(
            adapter,
            format!(
                "variable `{}` has {} domain; only continuous variables are supported",
                v.name(),
                v.domain()
            ),
        )),
        None => Ok(()),
    }
}

pub(crate) fn reject_quadratic_objective(adapter: &'static str, objective: &Objective) -> Result<()> {
    if objective.expression().is_linear() {
        Ok(())
    } else {
        Err(OptError::unsupported(
            adapter,
            "objective has quadratic terms",
        ))
    }
}

pub(crate) fn reject_quadratic_constraints(adapter: &'static str, model: &Model) -> Result<()> {
    match model.constraints().iter().find(|c| !c.is_linear()) {
        Some(c) => Err(OptError::unsupported(
            adapter,
            format!("constraint c{} has quadratic terms", c.id().index()),
        )),
        None => Ok(()),
    }
}

/// The objective must be convex when minimized and concave when maximized.
pub(crate) fn require_convex_objective(adapter: &'static str, objective: &Objective) -> Result<()> {
    let curv = curvature(objective.expression());
    // Maximizing f is minimizing -f.
    let ok = match objective.sense() {
        Sense::Minimize => curv.is_convex(),
        Sense::Maximize => curv.negate().is_convex(),
    };
    if ok {
        Ok(())
    } else {
        Err(OptError::unsupported(
            adapter,
            format!(
                "objective has {} curvature and cannot be {}d",
                curvature_name(curv),
                objective.sense().as_str()
            ),
        ))
    }
}

/// Quadratic constraints must be `convex <= rhs` or `concave >= rhs`.
pub(crate) fn require_convex_constraints(adapter: &'static str, model: &Model) -> Result<()> {
    for c in model.constraints().iter().filter(|c| !c.is_linear()) {
        let curv = curvature(c.expression());
        let ok = match c.relation() {
            Relation::LessEqual => curv.is_convex(),
            Relation::GreaterEqual => curv.negate().is_convex(),
            Relation::Equal => false,
        };
        if !ok {
            return Err(OptError::unsupported(
                adapter,
                format!(
                    "constraint c{} ({} quadratic {} rhs) is not convex",
                    c.id().index(),
                    curvature_name(curv),
                    c.relation()
                ),
            ));
        }
    }
    Ok(())
}

fn curvature_name(curv: Curvature) -> &'static str {
    match curv {
        Curvature::Constant => "constant",
        Curvature::Affine => "affine",
        Curvature::Convex => "convex",
        Curvature::Concave => "concave",
        Curvature::Unknown => "indefinite",
    }
}
