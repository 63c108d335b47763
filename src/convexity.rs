//! Curvature of quadratic expressions.
//!
//! The quadratic part of an expression is `x' Q x` with `Q` symmetric. Its
//! curvature follows from the eigenvalues of `Q`: all `>= 0` is convex, all
//! `<= 0` is concave, mixed signs are indefinite.

use nalgebra::{DMatrix, SymmetricEigen};

use crate::expr::{Expression, VariableId};

/// Curvature of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curvature {
    /// Constant value.
    Constant,
    /// Affine function (both convex and concave).
    Affine,
    /// Convex function.
    Convex,
    /// Concave function.
    Concave,
    /// Indefinite quadratic form.
    Unknown,
}

impl Curvature {
    /// Check if the curvature is convex (constant, affine, or convex).
    pub fn is_convex(self) -> bool {
        matches!(self, Curvature::Constant | Curvature::Affine | Curvature::Convex)
    }

    /// Negate the curvature (convex <-> concave).
    pub fn negate(self) -> Self {
        match self {
            Curvature::Convex => Curvature::Concave,
            Curvature::Concave => Curvature::Convex,
            other => other,
        }
    }
}

/// The symmetric matrix `Q` of the quadratic part, over the variables
/// returned alongside it (in sorted order).
pub fn quadratic_matrix(expr: &Expression) -> (Vec<VariableId>, DMatrix<f64>) {
    let vars = expr.quadratic_variables();
    let n = vars.len();
    let mut q = DMatrix::zeros(n, n);
    let position = |v: VariableId| vars.binary_search(&v).ok();
    for (a, b, coeff) in expr.quadratic_terms() {
        if let (Some(i), Some(j)) = (position(a), position(b)) {
            if i == j {
                q[(i, i)] += coeff;
            } else {
                q[(i, j)] += 0.5 * coeff;
                q[(j, i)] += 0.5 * coeff;
            }
        }
    }
    (vars, q)
}

fn eigen_tolerance(eigenvalues: &[f64]) -> f64 {
    let scale = eigenvalues.iter().fold(1.0_f64, |m, v| m.max(v.abs()));
    1e-9 * scale
}

/// Classify the curvature of an expression.
pub fn curvature(expr: &Expression) -> Curvature {
    match expr.degree() {
        0 => return Curvature::Constant,
        1 => return Curvature::Affine,
        _ => {}
    }
    let (_, q) = quadratic_matrix(expr);
    let eigen = SymmetricEigen::new(q);
    let values: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    let tol = eigen_tolerance(&values);
    let has_pos = values.iter().any(|v| *v > tol);
    let has_neg = values.iter().any(|v| *v < -tol);
    match (has_pos, has_neg) {
        (true, true) => Curvature::Unknown,
        (true, false) => Curvature::Convex,
        (false, true) => Curvature::Concave,
        (false, false) => Curvature::Affine,
    }
}

/// Factor a positive semi-definite `Q` as `F' F`.
///
/// Returns the rows of `F` (one per non-negligible eigenvalue), or `None` if
/// `Q` has a negative eigenvalue beyond tolerance.
pub fn psd_factor(q: &DMatrix<f64>) -> Option<Vec<Vec<f64>>> {
    let eigen = SymmetricEigen::new(q.clone());
    let values: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    let tol = eigen_tolerance(&values);
    if values.iter().any(|v| *v < -tol) {
        return None;
    }
    let rows = values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v > tol)
        .map(|(k, v)| {
            let root = v.sqrt();
            eigen
                .eigenvectors
                .column(k)
                .iter()
                .map(|e| root * e)
                .collect::<Vec<f64>>()
        })
        .collect();
    Some(rows)
}
