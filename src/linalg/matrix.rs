//! Dense row-major `f64` matrix.
//!
//! A thin value type over [`ndarray::Array2`]. All operations return new
//! matrices; nothing mutates an existing one after construction.
//!
//! # Example
//!
//! ```
//! use gmdh::linalg::Matrix;
//!
//! let a = Matrix::from_rows(&[vec![4.0, 7.0], vec![2.0, 6.0]]).unwrap();
//! let inv = a.invert().unwrap();
//! let product = a.multiply(&inv).unwrap();
//! assert!((product.get(0, 0) - 1.0).abs() < 1e-12);
//! assert!(product.get(0, 1).abs() < 1e-12);
//! ```

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::LinalgError;

/// Relative pivot threshold used by [`Matrix::invert`].
///
/// A pivot is considered zero when its magnitude is at or below
/// `PIVOT_TOLERANCE * n * max|a_ij|`.
pub const PIVOT_TOLERANCE: f64 = f64::EPSILON;

/// Dense matrix of `f64` values indexed `[row, col]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    /// Wrap an existing array.
    pub fn from_array(data: Array2<f64>) -> Self {
        Self { data }
    }

    /// Build a matrix from row vectors.
    ///
    /// All rows must have the same width; an empty slice yields a 0x0 matrix.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, LinalgError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Array2::zeros((n_rows, n_cols));

        for (r, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(LinalgError::RaggedRows {
                    row: r,
                    expected: n_cols,
                    got: row.len(),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                data[[r, c]] = value;
            }
        }

        Ok(Self { data })
    }

    /// A single column vector.
    pub fn column_vector(values: ArrayView1<'_, f64>) -> Self {
        let n = values.len();
        let mut data = Array2::zeros((n, 1));
        data.column_mut(0).assign(&values);
        Self { data }
    }

    /// The `n x n` identity.
    pub fn identity(n: usize) -> Self {
        Self {
            data: Array2::eye(n),
        }
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.n_rows() == self.n_cols()
    }

    /// Element at `[row, col]`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[[row, col]]
    }

    #[inline]
    pub fn column(&self, col: usize) -> ArrayView1<'_, f64> {
        self.data.column(col)
    }

    #[inline]
    pub fn row(&self, row: usize) -> ArrayView1<'_, f64> {
        self.data.row(row)
    }

    #[inline]
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    #[inline]
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }

    /// Matrix product `self * other`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, LinalgError> {
        if self.n_cols() != other.n_rows() {
            return Err(LinalgError::DimensionMismatch {
                left_rows: self.n_rows(),
                left_cols: self.n_cols(),
                right_rows: other.n_rows(),
                right_cols: other.n_cols(),
            });
        }
        Ok(Self {
            data: self.data.dot(&other.data),
        })
    }

    /// Matrix with rows and columns swapped.
    pub fn transpose(&self) -> Matrix {
        Self {
            data: self.data.t().to_owned(),
        }
    }

    /// Inverse by Gauss-Jordan elimination with partial pivoting.
    ///
    /// Fails with [`LinalgError::NotSquare`] for non-square input and with
    /// [`LinalgError::SingularMatrix`] when a pivot is numerically zero
    /// (see [`PIVOT_TOLERANCE`]) or the matrix contains non-finite values.
    pub fn invert(&self) -> Result<Matrix, LinalgError> {
        let (rows, cols) = self.shape();
        if rows != cols {
            return Err(LinalgError::NotSquare { rows, cols });
        }
        let n = rows;
        if n == 0 {
            return Ok(self.clone());
        }

        if self.data.iter().any(|v| !v.is_finite()) {
            return Err(LinalgError::SingularMatrix {
                column: 0,
                pivot: f64::NAN,
            });
        }

        let scale = self.data.iter().fold(0.0f64, |acc, &v| acc.max(v.abs()));
        let threshold = PIVOT_TOLERANCE * n as f64 * scale;

        let mut work = self.data.clone();
        let mut inverse = Array2::<f64>::eye(n);

        for col in 0..n {
            let mut pivot_row = col;
            for r in (col + 1)..n {
                if work[[r, col]].abs() > work[[pivot_row, col]].abs() {
                    pivot_row = r;
                }
            }

            let pivot = work[[pivot_row, col]];
            // An all-zero input has threshold 0 and fails here too.
            if pivot.abs() <= threshold {
                return Err(LinalgError::SingularMatrix { column: col, pivot });
            }

            if pivot_row != col {
                for j in 0..n {
                    work.swap([col, j], [pivot_row, j]);
                    inverse.swap([col, j], [pivot_row, j]);
                }
            }

            work.row_mut(col).mapv_inplace(|v| v / pivot);
            inverse.row_mut(col).mapv_inplace(|v| v / pivot);

            let pivot_work: Array1<f64> = work.row(col).to_owned();
            let pivot_inverse: Array1<f64> = inverse.row(col).to_owned();

            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = work[[r, col]];
                if factor != 0.0 {
                    work.row_mut(r).scaled_add(-factor, &pivot_work);
                    inverse.row_mut(r).scaled_add(-factor, &pivot_inverse);
                }
            }
        }

        Ok(Self { data: inverse })
    }

    /// Largest absolute element-wise difference to `other`.
    ///
    /// Returns `f64::INFINITY` when the shapes differ.
    pub fn max_abs_diff(&self, other: &Matrix) -> f64 {
        if self.shape() != other.shape() {
            return f64::INFINITY;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(0.0f64, |acc, (a, b)| acc.max((a - b).abs()))
    }
}

impl From<Array2<f64>> for Matrix {
    fn from(data: Array2<f64>) -> Self {
        Self::from_array(data)
    }
}
