//! Model nodes: construction, prediction and traversal.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use ndarray::{Array1, ArrayView1, ArrayView2, Axis, Zip};
use serde::{Deserialize, Serialize};

use super::{Criterion, FitContext, ModelError, QuadraticCoefficients};
use crate::linalg::Matrix;

/// Identity of a model: the round that produced it and its index there.
///
/// Indices are unique within a round only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModelId {
    pub round: usize,
    pub index: usize,
}

impl ModelId {
    pub fn new(round: usize, index: usize) -> Self {
        Self { round, index }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}_{}", self.round, self.index)
    }
}

/// What a node reads.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelInputs {
    /// Two raw predictor columns.
    Leaf { first: usize, second: usize },
    /// Two models from the previous round, owned by this node.
    Internal {
        left: Box<CombinationModel>,
        right: Box<CombinationModel>,
    },
}

/// A fitted and scored pairwise model.
#[derive(Debug, Clone, Serialize)]
pub struct CombinationModel {
    id: ModelId,
    inputs: ModelInputs,
    /// Columns of the round input matrix this node was fitted on.
    columns: (usize, usize),
    coefficients: QuadraticCoefficients,
    criterion: Criterion,
    /// Fourier feature over the node's training rows.
    ///
    /// Informational only: fitting, scoring and prediction never read it.
    #[serde(skip)]
    fourier_feature: Arc<[f64]>,
}

impl CombinationModel {
    /// Fit a leaf over raw predictor columns `first` and `second`.
    pub fn leaf(
        id: ModelId,
        first: usize,
        second: usize,
        ctx: &FitContext<'_>,
    ) -> Result<Self, ModelError> {
        Self::fit(id, ModelInputs::Leaf { first, second }, (first, second), ctx)
    }

    /// Fit a node over two previous-round models.
    ///
    /// `columns` are the positions of `left` and `right` in the round input
    /// matrix, i.e. the columns holding their fitted outputs.
    pub fn internal(
        id: ModelId,
        left: &CombinationModel,
        right: &CombinationModel,
        columns: (usize, usize),
        ctx: &FitContext<'_>,
    ) -> Result<Self, ModelError> {
        let inputs = ModelInputs::Internal {
            left: Box::new(left.clone()),
            right: Box::new(right.clone()),
        };
        Self::fit(id, inputs, columns, ctx)
    }

    fn fit(
        id: ModelId,
        inputs: ModelInputs,
        columns: (usize, usize),
        ctx: &FitContext<'_>,
    ) -> Result<Self, ModelError> {
        let n_cols = ctx.n_inputs();
        for column in [columns.0, columns.1] {
            if column >= n_cols {
                return Err(ModelError::ColumnOutOfRange { column, n_cols });
            }
        }

        let train = ctx.train_pair(columns);
        let test = ctx.test_pair(columns);

        let coefficients = QuadraticCoefficients::fit(train.u, train.v, train.targets)?;
        let criterion = Criterion::measure(&coefficients, train, test)?;
        let fourier_feature: Arc<[f64]> = ctx.fourier.transform_columns(train.u, train.v)?.to_vec().into();

        Ok(Self {
            id,
            inputs,
            columns,
            coefficients,
            criterion,
            fourier_feature,
        })
    }

    #[inline]
    pub fn id(&self) -> ModelId {
        self.id
    }

    #[inline]
    pub fn inputs(&self) -> &ModelInputs {
        &self.inputs
    }

    #[inline]
    pub fn columns(&self) -> (usize, usize) {
        self.columns
    }

    #[inline]
    pub fn coefficients(&self) -> &QuadraticCoefficients {
        &self.coefficients
    }

    #[inline]
    pub fn criterion(&self) -> &Criterion {
        &self.criterion
    }

    #[inline]
    pub fn fourier_feature(&self) -> &[f64] {
        &self.fourier_feature
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.inputs, ModelInputs::Leaf { .. })
    }

    /// Both children of an internal node.
    pub fn children(&self) -> Option<(&CombinationModel, &CombinationModel)> {
        match &self.inputs {
            ModelInputs::Leaf { .. } => None,
            ModelInputs::Internal { left, right } => Some((left.as_ref(), right.as_ref())),
        }
    }

    /// The fitted quadratic form at `(u, v)`.
    #[inline]
    pub fn evaluate(&self, u: f64, v: f64) -> f64 {
        self.coefficients.evaluate(u, v)
    }

    /// Prediction for one row of raw predictors.
    pub fn predict(&self, row: ArrayView1<'_, f64>) -> Result<f64, ModelError> {
        match &self.inputs {
            ModelInputs::Leaf { first, second } => {
                let read = |column: usize| {
                    row.get(column).copied().ok_or(ModelError::ColumnOutOfRange {
                        column,
                        n_cols: row.len(),
                    })
                };
                Ok(self.evaluate(read(*first)?, read(*second)?))
            }
            ModelInputs::Internal { left, right } => {
                Ok(self.evaluate(left.predict(row)?, right.predict(row)?))
            }
        }
    }

    /// Predictions for every row of a raw predictor matrix.
    pub fn predict_dataset(&self, features: &Matrix) -> Result<Array1<f64>, ModelError> {
        self.predict_rows(features.view())
    }

    /// Predictions for every row of a raw predictor view.
    pub fn predict_rows(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
        features
            .axis_iter(Axis(0))
            .map(|row| self.predict(row))
            .collect()
    }

    /// This node's output over a round input matrix.
    ///
    /// Reads only the node's own two columns; the result becomes one column
    /// of the next round's inputs.
    pub fn outputs(&self, inputs: ArrayView2<'_, f64>) -> Result<Array1<f64>, ModelError> {
        let (a, b) = self.columns;
        let n_cols = inputs.ncols();
        for column in [a, b] {
            if column >= n_cols {
                return Err(ModelError::ColumnOutOfRange { column, n_cols });
            }
        }
        Ok(Zip::from(inputs.column(a))
            .and(inputs.column(b))
            .map_collect(|&u, &v| self.evaluate(u, v)))
    }

    /// Distinct raw predictor indices reachable at this model's leaves.
    pub fn root_variables(&self) -> BTreeSet<usize> {
        let mut out = BTreeSet::new();
        self.collect_root_variables(&mut out);
        out
    }

    fn collect_root_variables(&self, out: &mut BTreeSet<usize>) {
        match &self.inputs {
            ModelInputs::Leaf { first, second } => {
                out.insert(*first);
                out.insert(*second);
            }
            ModelInputs::Internal { left, right } => {
                left.collect_root_variables(out);
                right.collect_root_variables(out);
            }
        }
    }

    /// Number of node levels; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self.children() {
            None => 1,
            Some((left, right)) => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of nodes in the tree, counting shared subtrees once per use.
    pub fn node_count(&self) -> usize {
        match self.children() {
            None => 1,
            Some((left, right)) => 1 + left.node_count() + right.node_count(),
        }
    }
}
