//! Clarabel solver integration.
//!
//! Shared backend of the linear, quadratic and nonlinear adapters: each of them
//! validates the model, stuffs it and hands the result to [`solve`].

use clarabel::algebra::CscMatrix as ClarabelCsc;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};

use super::config::SolverConfig;
use super::stuffing::{ConeDims, StuffedProblem};
use super::{SolveStatus, Solution};
use crate::error::{OptError, Result};
use crate::sparse::half_quadratic_form;

impl From<SolverStatus> for SolveStatus {
    fn from(status: SolverStatus) -> Self {
        match status {
            SolverStatus::Solved => SolveStatus::Optimal,
            SolverStatus::PrimalInfeasible => SolveStatus::Infeasible,
            SolverStatus::DualInfeasible => SolveStatus::Unbounded,
            SolverStatus::MaxIterations => SolveStatus::IterationLimit,
            SolverStatus::MaxTime => SolveStatus::TimeLimit,
            SolverStatus::NumericalError | SolverStatus::InsufficientProgress => {
                SolveStatus::NumericalError
            }
            _ => SolveStatus::Unknown,
        }
    }
}

/// Raw result of a Clarabel run, with what is needed to interpret it.
#[derive(Debug, Clone)]
pub struct ConicOutput {
    pub status: SolveStatus,
    /// Clarabel's own status name.
    pub raw_status: String,
    pub x: Vec<f64>,
    pub iterations: u32,
    pub solve_time: f64,
    pub problem: StuffedProblem,
}

/// Solve the stuffed problem using Clarabel.
pub fn solve(solver_name: &'static str, problem: StuffedProblem, config: &SolverConfig) -> Result<ConicOutput> {
    let p = to_clarabel_csc(&problem.p);
    let a = to_clarabel_csc(&problem.a);
    let cones = to_clarabel_cones(&problem.cone_dims);

    let mut builder = DefaultSettingsBuilder::default();
    builder.verbose(config.verbose.unwrap_or(false));
    if let Some(seconds) = config.time_limit {
        builder.time_limit(seconds);
    }
    if let Some(iterations) = config.max_iter {
        builder.max_iter(iterations);
    }
    if let Some(tol) = config.tolerance {
        builder.tol_gap_abs(tol).tol_gap_rel(tol).tol_feas(tol);
    }
    let settings = builder.build().map_err(|err| OptError::SolverFailure {
        solver: solver_name,
        status: SolveStatus::Unknown,
        message: format!("invalid settings: {err}"),
    })?;

    let mut solver = DefaultSolver::new(&p, &problem.q, &a, &problem.b, &cones, settings);
    solver.solve();

    let raw = solver.solution.status;
    tracing::debug!(
        component = "clarabel",
        operation = "solve",
        solver = solver_name,
        raw_status = ?raw,
        iterations = solver.info.iterations,
        solve_time = solver.solution.solve_time,
        "Clarabel finished"
    );

    let raw_status = format!("{raw:?}");
    Ok(ConicOutput {
        status: raw.into(),
        raw_status,
        x: solver.solution.x.clone(),
        iterations: solver.info.iterations,
        solve_time: solver.solution.solve_time,
        problem,
    })
}

/// Turn a Clarabel run into a [`Solution`], or `SolverFailure` if it did not
/// reach optimality.
pub fn extract(solver_name: &'static str, output: ConicOutput) -> Result<Solution> {
    if !output.status.is_optimal() {
        return Err(OptError::SolverFailure {
            solver: solver_name,
            status: output.status,
            message: format!("clarabel returned {}", output.raw_status),
        });
    }

    let problem = &output.problem;
    let x = &output.x;
    let linear: f64 = problem.q.iter().zip(x).map(|(qi, xi)| qi * xi).sum();
    let value = half_quadratic_form(&problem.p, x) + linear;

    let mut solution = Solution::new(solver_name, SolveStatus::Optimal);
    solution.objective_value = if problem.maximize { -value } else { value };
    solution.objective_constant = problem.objective_constant;
    solution.values = problem
        .columns
        .columns()
        .iter()
        .zip(x)
        .map(|(id, v)| (*id, *v))
        .collect();
    solution.solve_time = output.solve_time;
    solution.iterations = Some(output.iterations);
    Ok(solution)
}

/// Convert nalgebra CSC to Clarabel CSC.
fn to_clarabel_csc(m: &nalgebra_sparse::CscMatrix<f64>) -> ClarabelCsc<f64> {
    ClarabelCsc::new(
        m.nrows(),
        m.ncols(),
        m.col_offsets().to_vec(),
        m.row_indices().to_vec(),
        m.values().to_vec(),
    )
}

/// Convert cone dimensions to Clarabel cones.
fn to_clarabel_cones(dims: &ConeDims) -> Vec<SupportedConeT<f64>> {
    let mut cones = Vec::new();

    if dims.zero > 0 {
        cones.push(SupportedConeT::ZeroConeT(dims.zero));
    }

    if dims.nonneg > 0 {
        cones.push(SupportedConeT::NonnegativeConeT(dims.nonneg));
    }

    for &soc_dim in &dims.soc {
        cones.push(SupportedConeT::SecondOrderConeT(soc_dim));
    }

    cones
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(SolveStatus::from(SolverStatus::Solved), SolveStatus::Optimal);
        assert_eq!(SolveStatus::from(SolverStatus::PrimalInfeasible), SolveStatus::Infeasible);
        assert_eq!(SolveStatus::from(SolverStatus::DualInfeasible), SolveStatus::Unbounded);
        assert_eq!(SolveStatus::from(SolverStatus::MaxTime), SolveStatus::TimeLimit);
        assert_eq!(SolveStatus::from(SolverStatus::Unsolved), SolveStatus::Unknown);
    }

    #[test]
    fn test_to_clarabel_cones() {
        let dims = ConeDims {
            zero: 2,
            nonneg: 3,
            soc: vec![4],
        };
        let cones = to_clarabel_cones(&dims);
        assert_eq!(cones.len(), 3);

        let empty = to_clarabel_cones(&ConeDims::default());
        assert!(empty.is_empty());
    }
}
