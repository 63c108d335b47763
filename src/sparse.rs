//! Sparse matrix utilities.
//!
//! Helper functions for working with nalgebra-sparse matrices.

use nalgebra_sparse::{CooMatrix, CscMatrix};

/// Triplet accumulator for a sparse matrix under construction.
#[derive(Debug, Clone, Default)]
pub struct Triplets {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
    pub vals: Vec<f64>,
}

impl Triplets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Zero values are skipped.
    pub fn push(&mut self, row: usize, col: usize, val: f64) {
        if val != 0.0 {
            self.rows.push(row);
            self.cols.push(col);
            self.vals.push(val);
        }
    }

    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    /// Append all entries of `other`, shifting its rows down by `row_offset`.
    pub fn append_shifted(&mut self, other: &Triplets, row_offset: usize) {
        for ((r, c), v) in other.rows.iter().zip(&other.cols).zip(&other.vals) {
            self.push(r + row_offset, *c, *v);
        }
    }

    pub fn into_csc(self, nrows: usize, ncols: usize) -> CscMatrix<f64> {
        csc_from_triplets(nrows, ncols, self.rows, self.cols, self.vals)
    }
}

/// Create a CSC matrix from triplets (row, col, value).
///
/// Duplicates are summed together.
pub fn csc_from_triplets(
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    vals: Vec<f64>,
) -> CscMatrix<f64> {
    if rows.is_empty() {
        return CscMatrix::zeros(nrows, ncols);
    }

    let mut coo = CooMatrix::new(nrows, ncols);
    for ((row, col), val) in rows.into_iter().zip(cols).zip(vals) {
        if row < nrows && col < ncols {
            coo.push(row, col, val);
        }
    }

    CscMatrix::from(&coo)
}

/// Compute `(1/2) x' P x` for an upper-triangular `P`.
pub fn half_quadratic_form(p: &CscMatrix<f64>, x: &[f64]) -> f64 {
    let mut total = 0.0;
    for (row, col, val) in p.triplet_iter() {
        if row == col {
            total += 0.5 * *val * x[row] * x[col];
        } else {
            // stored once in the upper triangle
            total += *val * x[row] * x[col];
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csc_from_triplets_sums_duplicates() {
        let m = csc_from_triplets(2, 2, vec![0, 0, 1], vec![0, 0, 1], vec![1.0, 2.0, 3.0]);
        assert_eq!(m.nrows(), 2);
        let entries: Vec<_> = m.triplet_iter().map(|(r, c, v)| (r, c, *v)).collect();
        assert_eq!(entries, vec![(0, 0, 3.0), (1, 1, 3.0)]);
    }

    #[test]
    fn test_triplets_skip_zero_and_shift() {
        let mut a = Triplets::new();
        a.push(0, 0, 1.0);
        a.push(0, 1, 0.0);
        let mut b = Triplets::new();
        b.append_shifted(&a, 3);
        assert_eq!(b.len(), 1);
        assert_eq!(b.rows, vec![3]);
        let m = b.into_csc(4, 2);
        assert_eq!(m.nnz(), 1);
    }

    #[test]
    fn test_half_quadratic_form() {
        // P = [[2, 1], [., 4]] upper triangle => x'Px/2 = x0^2 + x0 x1 + 2 x1^2
        let p = csc_from_triplets(2, 2, vec![0, 0, 1], vec![0, 1, 1], vec![2.0, 1.0, 4.0]);
        let v = half_quadratic_form(&p, &[1.0, 2.0]);
        assert!((v - (1.0 + 2.0 + 8.0)).abs() < 1e-12);
    }
}
