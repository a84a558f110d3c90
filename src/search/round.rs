//! Per-round state, summaries and stop reasons.

use std::cmp::Ordering;
use std::fmt;

use ndarray::{Array2, ArrayView2};
use serde::Serialize;

use crate::model::{CombinationModel, ModelError, ModelId};
use crate::utils::Parallelism;

/// Models of the latest adopted round and the inputs they were fitted on.
///
/// `models` is sorted best-first. Column `c` of the input matrices is the
/// fitted output of model `c` of the previous round (raw predictors for
/// round 0).
#[derive(Debug, Clone)]
pub struct RoundState {
    pub round: usize,
    pub models: Vec<CombinationModel>,
    pub train_inputs: Array2<f64>,
    pub test_inputs: Array2<f64>,
}

impl RoundState {
    /// Best model of the round, if any model was fitted.
    #[inline]
    pub fn best(&self) -> Option<&CombinationModel> {
        self.models.first()
    }

    /// Best criterion of the round.
    #[inline]
    pub fn best_criterion(&self) -> Option<f64> {
        self.best().map(|m| m.criterion().total())
    }
}

/// Candidates of one generated round plus its summary.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// Fitted candidates, sorted best-first.
    pub candidates: Vec<CombinationModel>,
    pub summary: RoundSummary,
}

/// What happened in one round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub round: usize,
    /// Columns of the round input matrix.
    pub n_inputs: usize,
    /// Pairs attempted.
    pub n_candidates: usize,
    /// Pairs fitted and scored.
    pub n_fitted: usize,
    /// Pairs dropped because their fit was singular or underdetermined.
    pub n_unfit: usize,
    pub best_criterion: Option<f64>,
    pub best_model: Option<ModelId>,
    /// Whether the round became the new survivor set.
    pub adopted: bool,
}

/// Why the search stopped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopReason {
    /// Pruning would keep fewer than the minimum number of models.
    InsufficientSurvivors {
        available: usize,
        kept: usize,
        required: usize,
    },
    /// Fewer than two inputs remain, so no pair can be formed.
    NoCandidates { n_inputs: usize },
    /// Every candidate of the round failed to fit.
    NoViableCandidates { round: usize },
    /// The round's best criterion did not beat the previous best.
    Degraded {
        round: usize,
        best: f64,
        previous: f64,
    },
    /// The configured round limit was reached.
    MaxRounds { rounds: usize },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientSurvivors {
                available,
                kept,
                required,
            } => write!(
                f,
                "pruning {} models keeps {}, fewer than the required {}",
                available, kept, required
            ),
            Self::NoCandidates { n_inputs } => write!(f, "{} inputs cannot form a pair", n_inputs),
            Self::NoViableCandidates { round } => write!(f, "no candidate of round {} could be fitted", round),
            Self::Degraded {
                round,
                best,
                previous,
            } => write!(
                f,
                "models degrade: round {} best {:.6e} does not beat {:.6e}",
                round, best, previous
            ),
            Self::MaxRounds { rounds } => write!(f, "reached the limit of {} rounds", rounds),
        }
    }
}

/// Ranking used for every round: criterion ascending, then index.
///
/// Total over finite criteria, so the order never depends on the order in
/// which workers delivered their results.
pub fn rank(a: &CombinationModel, b: &CombinationModel) -> Ordering {
    a.criterion()
        .total()
        .total_cmp(&b.criterion().total())
        .then_with(|| a.id().index.cmp(&b.id().index))
}

/// Matrix whose column `c` is `models[c]`'s output over `inputs`.
pub fn output_matrix(
    models: &[CombinationModel],
    inputs: ArrayView2<'_, f64>,
    parallelism: Parallelism,
) -> Result<Array2<f64>, ModelError> {
    let columns = parallelism.maybe_par_map(models, |m| m.outputs(inputs));

    let mut out = Array2::zeros((inputs.nrows(), models.len()));
    for (c, column) in columns.into_iter().enumerate() {
        out.column_mut(c).assign(&column?);
    }
    Ok(out)
}
