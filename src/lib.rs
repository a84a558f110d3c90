//! gmdh: Fourier-GMDH combinatorial regression search.
//!
//! The search builds pairwise quadratic models over every pair of raw
//! predictors, scores them on held-out data, keeps the best-scoring subset
//! and recombines survivors round after round until the best model stops
//! improving.
//!
//! # Key Types
//!
//! - [`GmdhSearch`] - Runs the search over a train and a test [`Dataset`]
//! - [`SearchConfig`] - Search parameters (builder pattern)
//! - [`SearchReport`] - Final model, root variables and predictions
//! - [`CombinationModel`] - Recursive binary model tree
//!
//! # Example
//!
//! ```
//! use gmdh::{GmdhSearch, SearchConfig};
//! use gmdh::testing::data::quadratic_problem;
//!
//! let problem = quadratic_problem(12, 8, 4, (0, 2), 11);
//! let search = GmdhSearch::new(SearchConfig::default()).unwrap();
//! let report = search.fit(&problem.train, &problem.test).unwrap();
//!
//! assert_eq!(report.root_variables, vec![0, 2]);
//! assert!(report.is_valuable());
//! ```

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod data;
pub mod fourier;
pub mod linalg;
pub mod model;
pub mod search;
pub mod testing;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::{Dataset, DatasetError};
pub use fourier::{FourierConfig, FourierSeries};
pub use linalg::{LinalgError, Matrix};
pub use model::{CombinationModel, Criterion, ModelError, ModelId};
pub use search::{
    ConfigError, GmdhSearch, SearchConfig, SearchError, SearchLogger, SearchObserver, SearchReport,
    StopReason, Verbosity,
};
pub use utils::{run_with_threads, Parallelism};
