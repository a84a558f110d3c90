use ndarray::{Array1, Array2};
use rand::prelude::*;

use crate::data::Dataset;

/// Generate a random feature matrix.
///
/// Values are uniform in `[min, max]`.
pub fn random_features(rows: usize, cols: usize, seed: u64, min: f64, max: f64) -> Array2<f64> {
	assert!(max >= min);
	let mut rng = StdRng::seed_from_u64(seed);
	let width = max - min;
	Array2::from_shape_simple_fn((rows, cols), || min + rng.r#gen::<f64>() * width)
}

/// Coefficients `[b0..b5]` of the relationship behind [`quadratic_problem`]:
/// `2 + 3a - b + 0.5ab`.
pub const QUADRATIC_COEFFICIENTS: [f64; 6] = [2.0, 3.0, -1.0, 0.5, 0.0, 0.0];

/// Evaluate the quadratic form with coefficients `c` at `(a, b)`.
#[inline]
pub fn quadratic(c: &[f64; 6], a: f64, b: f64) -> f64 {
	c[0] + c[1] * a + c[2] * b + c[3] * a * b + c[4] * a * a + c[5] * b * b
}

/// Targets from two columns of `features` plus uniform noise in
/// `[-noise_amplitude, noise_amplitude]`.
pub fn quadratic_targets(
	features: &Array2<f64>,
	signal: (usize, usize),
	coefficients: &[f64; 6],
	seed: u64,
	noise_amplitude: f64,
) -> Array1<f64> {
	let mut rng = StdRng::seed_from_u64(seed);
	features
		.rows()
		.into_iter()
		.map(|row| {
			let mut y = quadratic(coefficients, row[signal.0], row[signal.1]);
			if noise_amplitude > 0.0 {
				y += (rng.r#gen::<f64>() * 2.0 - 1.0) * noise_amplitude;
			}
			y
		})
		.collect()
}

/// A synthetic train/test problem with a known generating relationship.
#[derive(Debug, Clone)]
pub struct SyntheticProblem {
	pub train: Dataset,
	pub test: Dataset,
	/// The two predictor columns the target depends on.
	pub signal: (usize, usize),
	pub coefficients: [f64; 6],
}

impl SyntheticProblem {
	/// The noise-free target at signal values `(a, b)`.
	pub fn truth(&self, a: f64, b: f64) -> f64 {
		quadratic(&self.coefficients, a, b)
	}
}

/// Problem where the target is [`QUADRATIC_COEFFICIENTS`] applied to the two
/// `signal` columns and every other column is uniform noise in `[-2, 2]`.
///
/// Targets carry no noise, so the leaf over `signal` fits exactly.
pub fn quadratic_problem(
	n_train: usize,
	n_test: usize,
	n_variables: usize,
	signal: (usize, usize),
	seed: u64,
) -> SyntheticProblem {
	assert!(signal.0 < n_variables && signal.1 < n_variables && signal.0 != signal.1);
	let coefficients = QUADRATIC_COEFFICIENTS;

	let split = |rows: usize, seed: u64| {
		let features = random_features(rows, n_variables, seed, -2.0, 2.0);
		let targets = quadratic_targets(&features, signal, &coefficients, seed, 0.0);
		Dataset::from_arrays(features, targets).unwrap_or_else(|e| panic!("invalid synthetic data: {e}"))
	};

	SyntheticProblem {
		train: split(n_train, seed),
		test: split(n_test, seed.wrapping_add(1)),
		signal,
		coefficients,
	}
}
