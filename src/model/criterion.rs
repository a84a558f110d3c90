//! External criterion: regularity plus unbiasedness.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use super::{ModelError, QuadraticCoefficients};

/// Paired input columns and targets of one data split.
#[derive(Debug, Clone, Copy)]
pub struct PairSample<'a> {
    pub u: ArrayView1<'a, f64>,
    pub v: ArrayView1<'a, f64>,
    pub targets: ArrayView1<'a, f64>,
}

/// Out-of-sample score of a fitted node. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Normalised squared prediction error on the test split.
    pub regularity: f64,
    /// Normalised squared disagreement between the train fit and a test-only
    /// re-fit, over every train and test row.
    pub unbiasedness: f64,
}

impl Criterion {
    /// `regularity + unbiasedness`.
    #[inline]
    pub fn total(&self) -> f64 {
        self.regularity + self.unbiasedness
    }

    /// Score `fitted` (trained on `train`) against `test`.
    ///
    /// Re-fits the same form on `test` alone for the unbiasedness term, so a
    /// singular test split fails the candidate just like a singular train
    /// split does.
    pub fn measure(
        fitted: &QuadraticCoefficients,
        train: PairSample<'_>,
        test: PairSample<'_>,
    ) -> Result<Self, ModelError> {
        let residual: f64 = rows(test)
            .map(|(u, v, y)| (y - fitted.evaluate(u, v)).powi(2))
            .sum();
        let regularity = residual / guarded_energy(test.targets.iter().copied());

        let refit = QuadraticCoefficients::fit(test.u, test.v, test.targets)?;
        let disagreement: f64 = rows(train)
            .chain(rows(test))
            .map(|(u, v, _)| (fitted.evaluate(u, v) - refit.evaluate(u, v)).powi(2))
            .sum();
        let energy = guarded_energy(train.targets.iter().chain(test.targets.iter()).copied());
        let unbiasedness = disagreement / energy;

        let criterion = Self {
            regularity,
            unbiasedness,
        };
        if !criterion.total().is_finite() {
            return Err(ModelError::NonFiniteCriterion);
        }
        Ok(criterion)
    }
}

fn rows<'a>(sample: PairSample<'a>) -> impl Iterator<Item = (f64, f64, f64)> + 'a {
    sample
        .u
        .into_iter()
        .zip(sample.v)
        .zip(sample.targets)
        .map(|((&u, &v), &y)| (u, v, y))
}

/// `Σ y²`, or 1 when that is zero.
fn guarded_energy(values: impl Iterator<Item = f64>) -> f64 {
    let sum: f64 = values.map(|y| y * y).sum();
    if sum == 0.0 {
        1.0
    } else {
        sum
    }
}
