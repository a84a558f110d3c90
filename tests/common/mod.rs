//! Shared helpers for integration tests.
//!
//! For assertion helpers and synthetic data, use `gmdh::testing`.

#![allow(dead_code)]

use ndarray::{Array1, Array2, Axis};

use gmdh::data::Dataset;
use gmdh::fourier::FourierConfig;
use gmdh::search::{RoundSummary, SearchConfig, SearchObserver, StopReason};
use gmdh::testing::data::{quadratic, random_features, QUADRATIC_COEFFICIENTS};

// Re-export testing utilities for convenience
#[allow(unused_imports)]
pub use gmdh::assert_approx_eq_f64;
#[allow(unused_imports)]
pub use gmdh::testing::{assert_slice_approx_eq_f64, DEFAULT_TOLERANCE};

// =============================================================================
// Configuration
// =============================================================================

/// A Fourier table small enough to keep tests fast.
pub fn small_fourier() -> FourierConfig {
    FourierConfig {
        terms: 4,
        quadrature_points: 8,
        ..FourierConfig::default()
    }
}

/// Default search settings with a small Fourier table.
pub fn fast_config(n_threads: usize) -> SearchConfig {
    SearchConfig::builder()
        .n_threads(n_threads)
        .fourier(small_fourier())
        .build()
        .unwrap()
}

// =============================================================================
// Data
// =============================================================================

/// Target `q(x0, x1) + q(x2, x3)`: no single pair explains it, but a node
/// over the leaves `(0, 1)` and `(2, 3)` nearly does.
pub fn additive_targets(features: &Array2<f64>) -> Array1<f64> {
    features
        .axis_iter(Axis(0))
        .map(|r| quadratic(&QUADRATIC_COEFFICIENTS, r[0], r[1]) + quadratic(&QUADRATIC_COEFFICIENTS, r[2], r[3]))
        .collect()
}

/// Train/test datasets over 4 variables with [`additive_targets`].
pub fn additive_problem(n_train: usize, n_test: usize, seed: u64) -> (Dataset, Dataset) {
    let split = |rows: usize, seed: u64| {
        let x = random_features(rows, 4, seed, -2.0, 2.0);
        let y = additive_targets(&x);
        Dataset::from_arrays(x, y).unwrap()
    };
    (split(n_train, seed), split(n_test, seed + 1))
}

// =============================================================================
// Observer
// =============================================================================

/// Observer that records every event it receives.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub started: Option<(usize, usize, usize)>,
    pub round_starts: Vec<(usize, usize)>,
    pub summaries: Vec<RoundSummary>,
    pub stops: Vec<(usize, StopReason)>,
}

impl SearchObserver for RecordingObserver {
    fn on_search_start(&mut self, n_variables: usize, n_train: usize, n_test: usize) {
        self.started = Some((n_variables, n_train, n_test));
    }

    fn on_round_start(&mut self, round: usize, n_inputs: usize) {
        self.round_starts.push((round, n_inputs));
    }

    fn on_round_complete(&mut self, summary: &RoundSummary) {
        self.summaries.push(summary.clone());
    }

    fn on_stop(&mut self, round: usize, reason: &StopReason) {
        self.stops.push((round, reason.clone()));
    }
}
