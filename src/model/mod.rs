//! Recursive binary combination models.
//!
//! A [`CombinationModel`] is either a leaf over two raw predictor columns or
//! an internal node over two models of the previous round. Every node fits
//! the same six-term quadratic form over its two inputs and is scored by
//! the external [`Criterion`].
//!
//! ```text
//!            m2_0                 round 2
//!           /    \
//!       m1_4      m1_7            round 1
//!      /   \      /   \
//!   m0_1  m0_3  m0_1  m0_5        round 0: leaves over (xi, xj)
//! ```
//!
//! Children are owned outright (boxed clones), so a model is a
//! self-contained value that can be evaluated on raw rows without the
//! search that produced it.

mod coefficients;
mod criterion;
mod node;
mod view;

pub use coefficients::{design_matrix, QuadraticCoefficients, N_COEFFICIENTS};
pub use criterion::{Criterion, PairSample};
pub use node::{CombinationModel, ModelId, ModelInputs};
pub use view::RoundView;

use ndarray::{ArrayView1, ArrayView2, Axis};

use crate::fourier::{FourierError, FourierSeries};
use crate::linalg::LinalgError;

/// Errors raised while building or evaluating a model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error(transparent)]
    Linalg(#[from] LinalgError),

    #[error(transparent)]
    Fourier(#[from] FourierError),

    #[error("column {column} out of range for input with {n_cols} columns")]
    ColumnOutOfRange { column: usize, n_cols: usize },

    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("{rows} rows cannot determine {params} coefficients")]
    Underdetermined { rows: usize, params: usize },

    #[error("criterion is not finite")]
    NonFiniteCriterion,
}

impl ModelError {
    /// Whether this error only means the candidate could not be fitted.
    ///
    /// The search drops such candidates and carries on; anything else is a
    /// caller bug and aborts the run.
    pub fn is_unfit(&self) -> bool {
        matches!(
            self,
            ModelError::Linalg(LinalgError::SingularMatrix { .. })
                | ModelError::Underdetermined { .. }
                | ModelError::NonFiniteCriterion
        )
    }
}

/// Everything a node needs to fit and score itself within one round.
///
/// Columns of the input matrices are raw predictors in round 0 and the
/// previous round's fitted outputs afterwards.
#[derive(Debug, Clone, Copy)]
pub struct FitContext<'a> {
    pub train_inputs: ArrayView2<'a, f64>,
    pub train_targets: ArrayView1<'a, f64>,
    pub test_inputs: ArrayView2<'a, f64>,
    pub test_targets: ArrayView1<'a, f64>,
    pub fourier: &'a FourierSeries,
}

impl<'a> FitContext<'a> {
    /// Bundle round inputs, checking that the splits agree in shape.
    pub fn new(
        train_inputs: ArrayView2<'a, f64>,
        train_targets: ArrayView1<'a, f64>,
        test_inputs: ArrayView2<'a, f64>,
        test_targets: ArrayView1<'a, f64>,
        fourier: &'a FourierSeries,
    ) -> Result<Self, ModelError> {
        if train_inputs.nrows() != train_targets.len() {
            return Err(ModelError::LengthMismatch {
                expected: train_inputs.nrows(),
                got: train_targets.len(),
            });
        }
        if test_inputs.nrows() != test_targets.len() {
            return Err(ModelError::LengthMismatch {
                expected: test_inputs.nrows(),
                got: test_targets.len(),
            });
        }
        if test_inputs.ncols() != train_inputs.ncols() {
            return Err(ModelError::LengthMismatch {
                expected: train_inputs.ncols(),
                got: test_inputs.ncols(),
            });
        }
        Ok(Self {
            train_inputs,
            train_targets,
            test_inputs,
            test_targets,
            fourier,
        })
    }

    #[inline]
    pub fn n_inputs(&self) -> usize {
        self.train_inputs.ncols()
    }

    fn train_pair(&self, (a, b): (usize, usize)) -> PairSample<'a> {
        PairSample {
            u: self.train_inputs.index_axis_move(Axis(1), a),
            v: self.train_inputs.index_axis_move(Axis(1), b),
            targets: self.train_targets,
        }
    }

    fn test_pair(&self, (a, b): (usize, usize)) -> PairSample<'a> {
        PairSample {
            u: self.test_inputs.index_axis_move(Axis(1), a),
            v: self.test_inputs.index_axis_move(Axis(1), b),
            targets: self.test_targets,
        }
    }
}
