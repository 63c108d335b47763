//! Matrix stuffing: converts a model to conic solver format.
//!
//! This module builds the matrices (P, q, A, b) and cone specification for
//!
//! ```text
//! minimize    (1/2) x' P x + q' x
//! subject to  s = b - A x,  s in K
//! ```
//!
//! with `K` a product of zero, nonnegative and second-order cones, in that
//! order. Maximization is handled by negating the objective.

use std::collections::HashMap;

use nalgebra_sparse::CscMatrix;

use crate::constraints::{Constraint, Relation};
use crate::convexity::{psd_factor, quadratic_matrix};
use crate::error::{OptError, Result};
use crate::expr::{Expression, VariableId};
use crate::model::{Model, Objective, Sense};
use crate::sparse::Triplets;

/// Cone dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConeDims {
    /// Number of zero cone (equality) rows.
    pub zero: usize,
    /// Number of nonnegative cone rows.
    pub nonneg: usize,
    /// Second-order cone dimensions (each entry is the cone dimension).
    pub soc: Vec<usize>,
}

impl ConeDims {
    /// Total number of constraint rows.
    pub fn total(&self) -> usize {
        self.zero + self.nonneg + self.soc.iter().sum::<usize>()
    }
}

/// Mapping from variable IDs to solver columns, in model insertion order.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: Vec<VariableId>,
    index: HashMap<VariableId, usize>,
}

impl ColumnMap {
    pub fn from_model(model: &Model) -> Self {
        let columns: Vec<VariableId> = model.variables().iter().map(|v| v.id()).collect();
        let index = columns.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        ColumnMap { columns, index }
    }

    pub fn get(&self, id: VariableId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    fn col(&self, id: VariableId) -> Result<usize> {
        self.get(id).ok_or(OptError::UnknownVariable(id))
    }

    pub fn columns(&self) -> &[VariableId] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Stuffed problem ready for a conic solver.
#[derive(Debug, Clone)]
pub struct StuffedProblem {
    /// Quadratic cost matrix P (n x n, upper triangle).
    pub p: CscMatrix<f64>,
    /// Linear cost vector q (n).
    pub q: Vec<f64>,
    /// Constraint matrix A (m x n).
    pub a: CscMatrix<f64>,
    /// Constraint vector b (m).
    pub b: Vec<f64>,
    /// Cone dimensions.
    pub cone_dims: ConeDims,
    /// Variable mapping for solution recovery.
    pub columns: ColumnMap,
    /// Constant offset of the objective (not seen by the solver).
    pub objective_constant: f64,
    /// Objective was negated to turn maximization into minimization.
    pub maximize: bool,
}

/// Rows of one cone class, with local row numbering.
#[derive(Debug, Default)]
struct RowBlock {
    a: Triplets,
    b: Vec<f64>,
}

impl RowBlock {
    fn push_row(&mut self, coeffs: impl IntoIterator<Item = (usize, f64)>, rhs: f64) {
        let row = self.b.len();
        for (col, val) in coeffs {
            self.a.push(row, col, val);
        }
        self.b.push(rhs);
    }

    fn rows(&self) -> usize {
        self.b.len()
    }
}

/// Build the stuffed problem for a model and its objective.
///
/// The caller is responsible for rejecting what its solver family cannot
/// express; quadratic constraints that are not convex are rejected here with
/// `UnsupportedModel` since the cone reformulation requires it.
pub fn stuff_model(
    adapter: &'static str,
    model: &Model,
    objective: &Objective,
) -> Result<StuffedProblem> {
    let columns = ColumnMap::from_model(model);
    let n = columns.len();
    let maximize = objective.sense() == Sense::Maximize;

    let (p, q) = stuff_objective(objective.expression(), maximize, &columns)?;

    let mut zero = RowBlock::default();
    let mut nonneg = RowBlock::default();
    let mut soc = RowBlock::default();
    let mut soc_dims = Vec::new();

    for var in model.variables() {
        let col = columns.col(var.id())?;
        let bounds = var.bounds().effective(var.domain());
        if bounds.lower == bounds.upper {
            zero.push_row([(col, 1.0)], bounds.lower);
            continue;
        }
        if bounds.lower.is_finite() {
            // x >= l  <=>  s = x - l >= 0
            nonneg.push_row([(col, -1.0)], -bounds.lower);
        }
        if bounds.upper.is_finite() {
            nonneg.push_row([(col, 1.0)], bounds.upper);
        }
    }

    for constraint in model.constraints() {
        if constraint.is_linear() {
            stuff_linear_constraint(constraint, &columns, &mut zero, &mut nonneg)?;
        } else {
            stuff_quadratic_constraint(
                adapter,
                constraint,
                &columns,
                &mut nonneg,
                &mut soc,
                &mut soc_dims,
            )?;
        }
    }

    let cone_dims = ConeDims {
        zero: zero.rows(),
        nonneg: nonneg.rows(),
        soc: soc_dims,
    };
    let m = cone_dims.total();

    let mut a = Triplets::new();
    a.append_shifted(&zero.a, 0);
    a.append_shifted(&nonneg.a, zero.rows());
    a.append_shifted(&soc.a, zero.rows() + nonneg.rows());
    let mut b = zero.b;
    b.extend(nonneg.b);
    b.extend(soc.b);

    tracing::debug!(
        component = "stuffing",
        operation = "stuff_model",
        adapter,
        columns = n,
        rows = m,
        zero_rows = cone_dims.zero,
        nonneg_rows = cone_dims.nonneg,
        soc_cones = cone_dims.soc.len(),
        p_nnz = p.nnz(),
        "Stuffed model into conic form"
    );

    Ok(StuffedProblem {
        p,
        q,
        a: a.into_csc(m, n),
        b,
        cone_dims,
        columns,
        objective_constant: objective.expression().constant(),
        maximize,
    })
}

/// Stuff the objective into P and q.
fn stuff_objective(
    expr: &Expression,
    maximize: bool,
    columns: &ColumnMap,
) -> Result<(CscMatrix<f64>, Vec<f64>)> {
    let n = columns.len();
    let sign = if maximize { -1.0 } else { 1.0 };

    let mut q = vec![0.0; n];
    for (var, coeff) in expr.linear_terms() {
        q[columns.col(var)?] += sign * coeff;
    }

    // Clarabel uses (1/2) x' P x: a square term c x_i^2 becomes P_ii = 2c and
    // a cross term c x_i x_j becomes P_ij = P_ji = c, kept in the upper triangle.
    let mut p = Triplets::new();
    for (a, b, coeff) in expr.quadratic_terms() {
        let i = columns.col(a)?;
        let j = columns.col(b)?;
        let val = if i == j { 2.0 * coeff } else { coeff };
        p.push(i.min(j), i.max(j), sign * val);
    }

    Ok((p.into_csc(n, n), q))
}

fn linear_coeffs(expr: &Expression, columns: &ColumnMap) -> Result<Vec<(usize, f64)>> {
    expr.linear_terms()
        .map(|(var, coeff)| Ok((columns.col(var)?, coeff)))
        .collect()
}

/// `a'x <= r` is the nonnegative row `s = r - a'x`; `>=` is negated; `==` is a
/// zero-cone row.
fn stuff_linear_constraint(
    constraint: &Constraint,
    columns: &ColumnMap,
    zero: &mut RowBlock,
    nonneg: &mut RowBlock,
) -> Result<()> {
    let (lhs, rhs) = constraint.normalized();
    let coeffs = linear_coeffs(&lhs, columns)?;
    match constraint.relation() {
        Relation::LessEqual => nonneg.push_row(coeffs, rhs),
        Relation::GreaterEqual => nonneg.push_row(coeffs.into_iter().map(|(c, v)| (c, -v)), -rhs),
        Relation::Equal => zero.push_row(coeffs, rhs),
    }
    Ok(())
}

/// Convex quadratic constraint as a second-order cone.
///
/// Writing the constraint as `g(x) = x'Qx + q'x + c <= 0` with `Q = F'F` and
/// `t = -(q'x + c)`, `||Fx||^2 <= t` is equivalent to
/// `||(Fx, (t - 1)/2)|| <= (t + 1)/2`.
fn stuff_quadratic_constraint(
    adapter: &'static str,
    constraint: &Constraint,
    columns: &ColumnMap,
    nonneg: &mut RowBlock,
    soc: &mut RowBlock,
    soc_dims: &mut Vec<usize>,
) -> Result<()> {
    let g = match constraint.relation() {
        Relation::LessEqual => constraint.expression().add_constant(-constraint.rhs()),
        Relation::GreaterEqual => constraint.expression().neg().add_constant(constraint.rhs()),
        Relation::Equal => {
            return Err(OptError::unsupported(
                adapter,
                format!(
                    "quadratic equality constraint c{} is not convex",
                    constraint.id().index()
                ),
            ))
        }
    };

    let (vars, qmat) = quadratic_matrix(&g);
    let factor = psd_factor(&qmat).ok_or_else(|| {
        OptError::unsupported(
            adapter,
            format!("constraint c{} is not convex", constraint.id().index()),
        )
    })?;
    let lin = linear_coeffs(&g.without_constant(), columns)?;
    let c0 = g.constant();

    if factor.is_empty() {
        nonneg.push_row(lin, -c0);
        return Ok(());
    }

    let quad_cols: Vec<usize> = vars
        .iter()
        .map(|v| columns.col(*v))
        .collect::<Result<_>>()?;
    let half: Vec<(usize, f64)> = lin.iter().map(|(c, v)| (*c, 0.5 * v)).collect();

    soc.push_row(half.iter().copied(), 0.5 * (1.0 - c0));
    for row in &factor {
        soc.push_row(quad_cols.iter().zip(row).map(|(c, v)| (*c, -v)), 0.0);
    }
    soc.push_row(half, 0.5 * (-c0 - 1.0));
    soc_dims.push(factor.len() + 2);
    Ok(())
}
