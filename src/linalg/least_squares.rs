//! Ordinary least squares through the normal equations.

use ndarray::{Array1, ArrayView1};

use super::{LinalgError, Matrix};

/// Solve `min ||X b - y||²` as `b = (XᵗX)⁻¹ Xᵗ y`.
///
/// `design` is `n x p`, `targets` has length `n`; the result has length `p`.
/// Fails with [`LinalgError::SingularMatrix`] when `XᵗX` cannot be inverted
/// (collinear columns, or fewer distinct rows than parameters).
pub fn least_squares(design: &Matrix, targets: ArrayView1<'_, f64>) -> Result<Array1<f64>, LinalgError> {
    let y = Matrix::column_vector(targets);
    let xt = design.transpose();
    let normal = xt.multiply(design)?;
    let normal_inv = normal.invert()?;
    let solution = normal_inv.multiply(&xt)?.multiply(&y)?;
    Ok(solution.column(0).to_owned())
}
