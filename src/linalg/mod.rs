//! Dense linear algebra for candidate fitting.
//!
//! Every candidate model is fitted through the normal equations
//! `B = (XᵗX)⁻¹ Xᵗ y`, so the only operations needed are multiplication,
//! transposition and inversion of small dense matrices. [`Matrix`] provides
//! exactly those three on top of `ndarray`, and [`least_squares`] chains
//! them.
//!
//! No other matrix algebra (decompositions, eigenvalues, ...) lives here.

mod least_squares;
mod matrix;

pub use least_squares::least_squares;
pub use matrix::{Matrix, PIVOT_TOLERANCE};

/// Errors raised by matrix operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinalgError {
    #[error("dimension mismatch: cannot multiply {left_rows}x{left_cols} by {right_rows}x{right_cols}")]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("matrix must be square to invert, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("matrix is singular (pivot {pivot:e} at column {column})")]
    SingularMatrix { column: usize, pivot: f64 },

    #[error("rows have inconsistent widths: row {row} has {got} values, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
}
