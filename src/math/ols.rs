//! Ordinary least squares via QR factorization.
//!
//! We solve
//!
//! ```text
//! minimize ||y - X c||^2
//! ```
//!
//! by factorizing `X = Q R` (economy form: `Q` is `N×n`, `R` is `n×n` upper
//! triangular) and back-substituting `R c = Qᵀ y` from the last coefficient to
//! the first. Working on `R` directly avoids forming `XᵀX`, which would square
//! the condition number of `X`.

use nalgebra::{DMatrix, DVector};

use crate::error::RegressionError;

/// Solve a least squares problem using QR decomposition.
///
/// `x` must be tall (`rows >= cols`). Returns
/// [`RegressionError::SingularMatrix`] if `R` has a numerically zero pivot.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, RegressionError> {
    let (rows, cols) = x.shape();
    if rows < cols {
        return Err(RegressionError::Underdetermined {
            observations: rows,
            terms: cols,
        });
    }

    let qr = x.clone().qr();
    let q = qr.q();
    let r = qr.r();
    let qty = q.transpose() * y;

    back_substitute(&r, &qty, rows)
}

/// Solve `R c = rhs` for upper-triangular `R`.
///
/// Column `j` is rank deficient when `|R_jj| <= ε · max(rows, n) · ‖R_:j‖`.
/// Since `X = Q R`, `‖R_:j‖` is the norm of design column `j`: each column is
/// judged against its own scale. `rows` is the row count of the design matrix.
pub fn back_substitute(r: &DMatrix<f64>, rhs: &DVector<f64>, rows: usize) -> Result<DVector<f64>, RegressionError> {
    let n = r.ncols();
    let mut c = DVector::<f64>::zeros(n);

    for i in (0..n).rev() {
        let pivot = r[(i, i)];
        if !pivot.is_finite() || pivot.abs() <= pivot_tolerance(r, i, rows) {
            return Err(RegressionError::SingularMatrix { column: i, pivot });
        }

        let mut acc = rhs[i];
        for j in (i + 1)..n {
            acc -= c[j] * r[(i, j)];
        }
        c[i] = acc / pivot;

        if !c[i].is_finite() {
            return Err(RegressionError::SingularMatrix { column: i, pivot });
        }
    }

    Ok(c)
}

/// Zero-pivot threshold for column `j`, scaled by that column's norm.
fn pivot_tolerance(r: &DMatrix<f64>, j: usize, rows: usize) -> f64 {
    let column_norm = r.column(j).norm();
    column_norm * f64::EPSILON * rows.max(r.ncols()) as f64
}
