//! Final result of a search.

use std::fmt::Write as _;
use std::time::Duration;

use ndarray::{concatenate, Array1, Axis};
use serde::Serialize;

use super::{RoundSummary, SearchError, StopReason};
use crate::data::Dataset;
use crate::model::{CombinationModel, Criterion, ModelError, ModelId};

/// The final model and how the search reached it.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub model: CombinationModel,
    pub criterion: Criterion,
    /// Raw predictor indices the model depends on, ascending, 0-based.
    pub root_variables: Vec<usize>,
    pub train_predictions: Array1<f64>,
    pub test_predictions: Array1<f64>,
    /// One summary per generated round, including a final discarded one.
    pub rounds: Vec<RoundSummary>,
    pub stop_reason: StopReason,
    pub elapsed_secs: f64,
    pub valuable_threshold: f64,
}

impl SearchReport {
    pub(super) fn new(
        model: CombinationModel,
        train: &Dataset,
        test: &Dataset,
        rounds: Vec<RoundSummary>,
        stop_reason: StopReason,
        elapsed: Duration,
        valuable_threshold: f64,
    ) -> Result<Self, SearchError> {
        let train_predictions = model.predict_rows(train.features_view())?;
        let test_predictions = model.predict_rows(test.features_view())?;
        Ok(Self {
            criterion: *model.criterion(),
            root_variables: model.root_variables().into_iter().collect(),
            model,
            train_predictions,
            test_predictions,
            rounds,
            stop_reason,
            elapsed_secs: elapsed.as_secs_f64(),
            valuable_threshold,
        })
    }

    #[inline]
    pub fn model_id(&self) -> ModelId {
        self.model.id()
    }

    /// Whether the final criterion is below the valuable threshold.
    #[inline]
    pub fn is_valuable(&self) -> bool {
        self.criterion.total() < self.valuable_threshold
    }

    /// Predictions for every train row, then every test row.
    pub fn predictions(&self) -> Array1<f64> {
        concatenate![Axis(0), self.train_predictions, self.test_predictions]
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// The model tree, one block per round, highest round first.
    ///
    /// Model indices are shown 1-based, e.g. `Model #1_3`.
    pub fn tree_view(&self) -> String {
        let mut out = String::new();
        for round in self.model.rounds() {
            let _ = writeln!(out, "Round {}:", round.round);
            for (id, formula) in &round.nodes {
                let rhs = formula.split_once(" = ").map_or(formula.as_str(), |(_, rhs)| rhs);
                let _ = writeln!(out, "  Model #{}_{} = {}", id.round, id.index + 1, rhs);
            }
        }
        out
    }

    /// Re-evaluate the final model on new raw predictors.
    pub fn predict(&self, data: &Dataset) -> Result<Array1<f64>, ModelError> {
        self.model.predict_rows(data.features_view())
    }
}
