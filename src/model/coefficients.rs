//! The six-term quadratic form shared by every node.

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use super::ModelError;
use crate::linalg::{least_squares, Matrix};

/// Number of fitted parameters per node.
pub const N_COEFFICIENTS: usize = 6;

/// Fitted coefficients of `b0 + b1·u + b2·v + b3·u·v + b4·u² + b5·v²`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticCoefficients([f64; N_COEFFICIENTS]);

impl QuadraticCoefficients {
    pub fn new(values: [f64; N_COEFFICIENTS]) -> Self {
        Self(values)
    }

    /// Least-squares fit of the form to `targets` over inputs `(u, v)`.
    ///
    /// Needs at least [`N_COEFFICIENTS`] rows; a singular normal matrix is
    /// reported as [`ModelError::Linalg`].
    pub fn fit(
        u: ArrayView1<'_, f64>,
        v: ArrayView1<'_, f64>,
        targets: ArrayView1<'_, f64>,
    ) -> Result<Self, ModelError> {
        let rows = u.len();
        if v.len() != rows || targets.len() != rows {
            return Err(ModelError::LengthMismatch {
                expected: rows,
                got: if v.len() != rows { v.len() } else { targets.len() },
            });
        }
        if rows < N_COEFFICIENTS {
            return Err(ModelError::Underdetermined {
                rows,
                params: N_COEFFICIENTS,
            });
        }

        let design = design_matrix(u, v);
        let solution = least_squares(&design, targets)?;

        let mut values = [0.0; N_COEFFICIENTS];
        for (dst, &src) in values.iter_mut().zip(solution.iter()) {
            *dst = src;
        }
        Ok(Self(values))
    }

    /// Value of the form at `(u, v)`.
    #[inline]
    pub fn evaluate(&self, u: f64, v: f64) -> f64 {
        let [b0, b1, b2, b3, b4, b5] = self.0;
        b0 + b1 * u + b2 * v + b3 * u * v + b4 * u * u + b5 * v * v
    }

    #[inline]
    pub fn values(&self) -> &[f64; N_COEFFICIENTS] {
        &self.0
    }
}

/// Design matrix with columns `[1, u, v, uv, u², v²]`.
pub fn design_matrix(u: ArrayView1<'_, f64>, v: ArrayView1<'_, f64>) -> Matrix {
    let mut data = Array2::zeros((u.len(), N_COEFFICIENTS));
    for (mut row, (&a, &b)) in data.rows_mut().into_iter().zip(u.iter().zip(v.iter())) {
        row[0] = 1.0;
        row[1] = a;
        row[2] = b;
        row[3] = a * b;
        row[4] = a * a;
        row[5] = b * b;
    }
    Matrix::from_array(data)
}
