//! The round loop.

use std::time::Instant;

use super::callback::{DegradationMonitor, RoundAction};
use super::logger::{SearchLogger, SearchObserver};
use super::report::SearchReport;
use super::round::{output_matrix, rank, RoundOutcome, RoundState, RoundSummary, StopReason};
use super::shard::ShardPlan;
use super::{SearchConfig, SearchError};
use crate::data::Dataset;
use crate::fourier::FourierSeries;
use crate::model::{CombinationModel, FitContext, ModelError, ModelId};
use crate::utils::{run_with_threads, Parallelism};

/// Combinatorial GMDH search.
///
/// Holds the validated configuration and the Fourier coefficient table,
/// which is computed once here and shared by every round and worker.
///
/// # Example
///
/// ```
/// use gmdh::search::{GmdhSearch, SearchConfig};
/// use gmdh::testing::data::quadratic_problem;
///
/// let problem = quadratic_problem(12, 8, 4, (0, 2), 7);
/// let config = SearchConfig::builder().n_threads(1).build().unwrap();
/// let report = GmdhSearch::new(config).unwrap().fit(&problem.train, &problem.test).unwrap();
/// assert!(report.is_valuable());
/// ```
#[derive(Debug, Clone)]
pub struct GmdhSearch {
    config: SearchConfig,
    fourier: FourierSeries,
}

impl GmdhSearch {
    /// Validate `config` and precompute the Fourier table.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let fourier = FourierSeries::new(&config.fourier);
        Ok(Self { config, fourier })
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn fourier(&self) -> &FourierSeries {
        &self.fourier
    }

    /// Run the search, printing progress at the configured verbosity.
    pub fn fit(&self, train: &Dataset, test: &Dataset) -> Result<SearchReport, SearchError> {
        let mut logger = SearchLogger::new(self.config.verbosity);
        self.fit_with_observer(train, test, &mut logger)
    }

    /// Run the search, reporting progress to `observer`.
    ///
    /// Models are fitted on `train` and scored on `test`.
    pub fn fit_with_observer(
        &self,
        train: &Dataset,
        test: &Dataset,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchReport, SearchError> {
        train.check_compatible(test)?;
        if train.n_features() < 2 {
            return Err(SearchError::InsufficientVariables {
                found: train.n_features(),
            });
        }

        let started = Instant::now();
        let (state, rounds, stop_reason) =
            run_with_threads(self.config.n_threads, |parallelism| {
                self.run(train, test, parallelism, observer)
            })??;

        let best = state.best().ok_or(SearchError::NoViableModels {
            attempted: rounds.first().map_or(0, |r| r.n_candidates),
        })?;
        SearchReport::new(
            best.clone(),
            train,
            test,
            rounds,
            stop_reason,
            started.elapsed(),
            self.config.valuable_threshold,
        )
    }

    fn run(
        &self,
        train: &Dataset,
        test: &Dataset,
        parallelism: Parallelism,
        observer: &mut dyn SearchObserver,
    ) -> Result<(RoundState, Vec<RoundSummary>, StopReason), SearchError> {
        let n_variables = train.n_features();
        observer.on_search_start(n_variables, train.n_rows(), test.n_rows());

        let raw = FitContext::new(
            train.features_view(),
            train.targets(),
            test.features_view(),
            test.targets(),
            &self.fourier,
        )?;

        observer.on_round_start(0, n_variables);
        let RoundOutcome {
            candidates: leaves,
            mut summary,
        } = self.initial_round(&raw, parallelism)?;

        let mut monitor = DegradationMonitor::new(self.config.min_improvement);
        if leaves.is_empty() {
            observer.on_round_complete(&summary);
            return Err(SearchError::NoViableModels {
                attempted: summary.n_candidates,
            });
        }
        monitor.update(summary.best_criterion);
        summary.adopted = true;
        observer.on_round_complete(&summary);

        let mut rounds = vec![summary];
        let mut state = RoundState {
            round: 0,
            models: leaves,
            train_inputs: train.features().as_array().clone(),
            test_inputs: test.features().as_array().clone(),
        };

        let stop_reason = loop {
            if let Some(max) = self.config.max_rounds {
                if state.round >= max {
                    break StopReason::MaxRounds { rounds: state.round };
                }
            }

            // Round 1 recombines every leaf; later rounds are pruned.
            let n_available = state.models.len();
            let n_parents = if state.round == 0 {
                n_available
            } else {
                let kept = self.config.survivor_count(n_available);
                if kept < self.config.min_survivors {
                    break StopReason::InsufficientSurvivors {
                        available: n_available,
                        kept,
                        required: self.config.min_survivors,
                    };
                }
                kept
            };
            if n_parents < 2 {
                break StopReason::NoCandidates { n_inputs: n_parents };
            }
            let parents = &state.models[..n_parents];

            let train_inputs = output_matrix(parents, state.train_inputs.view(), parallelism)?;
            let test_inputs = output_matrix(parents, state.test_inputs.view(), parallelism)?;
            let ctx = FitContext::new(
                train_inputs.view(),
                train.targets(),
                test_inputs.view(),
                test.targets(),
                &self.fourier,
            )?;

            let round = state.round + 1;
            observer.on_round_start(round, n_parents);
            let RoundOutcome {
                candidates,
                mut summary,
            } = self.generate_round(round, parents, &ctx, parallelism)?;

            match monitor.update(summary.best_criterion) {
                RoundAction::Improved => {
                    summary.adopted = true;
                    observer.on_round_complete(&summary);
                    rounds.push(summary);
                    state = RoundState {
                        round,
                        models: candidates,
                        train_inputs,
                        test_inputs,
                    };
                }
                RoundAction::Degraded => {
                    observer.on_round_complete(&summary);
                    let previous = state.best_criterion().unwrap_or(f64::INFINITY);
                    let reason = match summary.best_criterion {
                        None => StopReason::NoViableCandidates { round },
                        Some(best) => StopReason::Degraded {
                            round,
                            best,
                            previous,
                        },
                    };
                    rounds.push(summary);
                    break reason;
                }
            }
        };

        log::info!("search stopped at round {}: {}", state.round, stop_reason);
        observer.on_stop(state.round, &stop_reason);
        Ok((state, rounds, stop_reason))
    }

    /// Build and score a leaf for every pair of raw predictor columns.
    ///
    /// `ctx` holds the raw train/test predictors. Run inside
    /// [`run_with_threads`] to choose the worker count.
    pub fn initial_round(
        &self,
        ctx: &FitContext<'_>,
        parallelism: Parallelism,
    ) -> Result<RoundOutcome, SearchError> {
        let n_inputs = ctx.n_inputs();
        let plan = ShardPlan::new(n_inputs, parallelism.n_threads());
        let outcome = run_shards(0, &plan, parallelism, |index, k, j| {
            CombinationModel::leaf(ModelId::new(0, index), k, j, ctx)
        })?;
        Ok(outcome)
    }

    /// Build and score an internal node for every pair of `parents`.
    ///
    /// Column `c` of `ctx`'s input matrices must hold `parents[c]`'s fitted
    /// output (see [`output_matrix`]).
    pub fn generate_round(
        &self,
        round: usize,
        parents: &[CombinationModel],
        ctx: &FitContext<'_>,
        parallelism: Parallelism,
    ) -> Result<RoundOutcome, SearchError> {
        if ctx.n_inputs() != parents.len() {
            return Err(ModelError::LengthMismatch {
                expected: parents.len(),
                got: ctx.n_inputs(),
            }
            .into());
        }
        let plan = ShardPlan::new(parents.len(), parallelism.n_threads());
        let outcome = run_shards(round, &plan, parallelism, |index, k, j| {
            CombinationModel::internal(ModelId::new(round, index), &parents[k], &parents[j], (k, j), ctx)
        })?;
        Ok(outcome)
    }
}

/// Models one worker produced, plus how many of its pairs were unfit.
struct ShardOutput {
    models: Vec<CombinationModel>,
    n_unfit: usize,
}

/// Build every pair of `plan`, one shard per worker, and merge.
///
/// Each worker returns its own output; results are concatenated in worker
/// order once all workers have finished, then ranked.
fn run_shards<F>(
    round: usize,
    plan: &ShardPlan,
    parallelism: Parallelism,
    build: F,
) -> Result<RoundOutcome, ModelError>
where
    F: Fn(usize, usize, usize) -> Result<CombinationModel, ModelError> + Sync + Send,
{
    let n_inputs = plan.n_inputs();
    let outputs = parallelism.maybe_par_map(plan.shards(), |shard| {
        let mut out = ShardOutput {
            models: Vec::with_capacity(shard.n_pairs(n_inputs)),
            n_unfit: 0,
        };
        for (index, k, j) in shard.pairs(n_inputs) {
            match build(index, k, j) {
                Ok(model) => out.models.push(model),
                Err(e) if e.is_unfit() => out.n_unfit += 1,
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    });

    let mut candidates = Vec::with_capacity(plan.n_pairs());
    let mut n_unfit = 0;
    for output in outputs {
        let output = output?;
        candidates.extend(output.models);
        n_unfit += output.n_unfit;
    }
    candidates.sort_by(rank);

    let n_candidates = plan.n_pairs();
    log::debug!(
        "round {}: {} of {} candidates fitted",
        round,
        candidates.len(),
        n_candidates
    );
    if n_unfit * 2 > n_candidates {
        log::warn!(
            "round {}: {} of {} candidates dropped as unfit",
            round,
            n_unfit,
            n_candidates
        );
    }

    let summary = RoundSummary {
        round,
        n_inputs,
        n_candidates,
        n_fitted: candidates.len(),
        n_unfit,
        best_criterion: candidates.first().map(|m| m.criterion().total()),
        best_model: candidates.first().map(|m| m.id()),
        adopted: false,
    };
    Ok(RoundOutcome {
        candidates,
        summary,
    })
}
