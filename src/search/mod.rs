//! Round-based combinatorial search.
//!
//! [`GmdhSearch`] grows [`CombinationModel`](crate::model::CombinationModel)
//! trees round by round:
//!
//! 1. Round 0 fits a leaf for every pair of raw predictors.
//! 2. Round `k + 1` fits a node for every pair of surviving round-`k`
//!    models, using their fitted outputs as inputs.
//! 3. Each round is ranked by external criterion and pruned before the
//!    next one is generated.
//! 4. The search stops once a round fails to beat the previous best, and
//!    reports the previous best.
//!
//! # Example
//!
//! ```
//! use gmdh::search::{GmdhSearch, SearchConfig, StopReason};
//! use gmdh::testing::data::quadratic_problem;
//!
//! let problem = quadratic_problem(12, 8, 4, (1, 3), 3);
//! let config = SearchConfig::builder().n_threads(2).build().unwrap();
//! let report = GmdhSearch::new(config)
//!     .unwrap()
//!     .fit(&problem.train, &problem.test)
//!     .unwrap();
//!
//! assert_eq!(report.root_variables, vec![1, 3]);
//! assert!(matches!(report.stop_reason, StopReason::Degraded { .. }));
//! ```

mod callback;
mod config;
mod logger;
mod report;
mod round;
mod searcher;
mod shard;

pub use callback::{DegradationMonitor, RoundAction};
pub use config::{ConfigError, SearchConfig};
pub use logger::{NoopObserver, SearchLogger, SearchObserver, Verbosity};
pub use report::SearchReport;
pub use round::{output_matrix, rank, RoundOutcome, RoundState, RoundSummary, StopReason};
pub use searcher::GmdhSearch;
pub use shard::{triangular_offset, Shard, ShardPlan};

use crate::data::DatasetError;
use crate::model::ModelError;

/// Errors that abort a search.
///
/// Candidates that merely fail to fit are dropped and counted per round;
/// running out of survivors or degrading are [`StopReason`]s.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("at least 2 predictor columns are required, found {found}")]
    InsufficientVariables { found: usize },

    #[error("none of the {attempted} leaf candidates could be fitted")]
    NoViableModels { attempted: usize },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
