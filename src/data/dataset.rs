//! Validated predictor matrix plus targets.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::linalg::Matrix;

/// Dataset construction/validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset has no rows")]
    Empty,

    #[error("number of targets ({targets}) does not match number of rows ({rows})")]
    TargetLenMismatch { rows: usize, targets: usize },

    #[error("non-finite predictor value at row {row}, column {column}")]
    NonFiniteFeature { row: usize, column: usize },

    #[error("non-finite target at row {row}")]
    NonFiniteTarget { row: usize },

    #[error("feature count mismatch: training data has {train} columns, test data has {test}")]
    FeatureCountMismatch { train: usize, test: usize },
}

/// Predictors and targets of one data split.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Matrix,
    targets: Array1<f64>,
}

impl Dataset {
    /// Create a dataset, checking shape and finiteness.
    pub fn new(features: Matrix, targets: Array1<f64>) -> Result<Self, DatasetError> {
        let rows = features.n_rows();
        if rows == 0 {
            return Err(DatasetError::Empty);
        }
        if targets.len() != rows {
            return Err(DatasetError::TargetLenMismatch {
                rows,
                targets: targets.len(),
            });
        }
        if let Some(((row, column), _)) = features.as_array().indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(DatasetError::NonFiniteFeature { row, column });
        }
        if let Some(row) = targets.iter().position(|v| !v.is_finite()) {
            return Err(DatasetError::NonFiniteTarget { row });
        }
        Ok(Self { features, targets })
    }

    /// Create a dataset from a predictor array and targets.
    pub fn from_arrays(features: Array2<f64>, targets: Array1<f64>) -> Result<Self, DatasetError> {
        Self::new(Matrix::from_array(features), targets)
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.features.n_rows()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.n_cols()
    }

    #[inline]
    pub fn features(&self) -> &Matrix {
        &self.features
    }

    #[inline]
    pub fn features_view(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    #[inline]
    pub fn targets(&self) -> ArrayView1<'_, f64> {
        self.targets.view()
    }

    /// Check that `test` can score models fitted on `self`.
    pub fn check_compatible(&self, test: &Dataset) -> Result<(), DatasetError> {
        if self.n_features() != test.n_features() {
            return Err(DatasetError::FeatureCountMismatch {
                train: self.n_features(),
                test: test.n_features(),
            });
        }
        Ok(())
    }
}
