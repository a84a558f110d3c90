//! Coefficient table and per-row evaluation of the truncated series.

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::{lambda, FourierConfig, FourierError, GaussLegendre};

/// Fourier coefficients of one harmonic `(n, m)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FourierCoefficients {
    /// cos·cos coefficient.
    pub alpha: f64,
    /// sin·cos coefficient.
    pub beta: f64,
    /// cos·sin coefficient.
    pub gamma: f64,
    /// sin·sin coefficient.
    pub delta: f64,
}

/// Precomputed truncated double Fourier series of `x + y`.
///
/// Building the table costs `terms² · points²` integrand evaluations; the
/// per-row transform then costs `O(terms²)` multiply-adds plus `4·terms`
/// trigonometric calls.
#[derive(Debug, Clone)]
pub struct FourierSeries {
    terms: usize,
    angular_frequency: f64,
    /// Row-major `[n * terms + m]`, with `lambda(n, m)` already folded in.
    weighted: Vec<FourierCoefficients>,
    /// Row-major `[n * terms + m]`, raw integrals.
    coefficients: Vec<FourierCoefficients>,
}

impl FourierSeries {
    /// Integrate the coefficient table for `config`.
    pub fn new(config: &FourierConfig) -> Self {
        let terms = config.terms;
        let period = config.period;
        let w = config.angular_frequency();
        let rule = GaussLegendre::new(config.quadrature_points);
        let norm = 1.0 / (period * period);
        let domain = (-period, period);

        let mut coefficients = Vec::with_capacity(terms * terms);
        for n in 0..terms {
            for m in 0..terms {
                let (nw, mw) = (n as f64 * w, m as f64 * w);
                let mut c = FourierCoefficients::default();
                for (x, y, weight) in rule.rectangle_points(domain, domain) {
                    let f = (x + y) * weight;
                    let (sin_x, cos_x) = (nw * x).sin_cos();
                    let (sin_y, cos_y) = (mw * y).sin_cos();
                    c.alpha += f * cos_x * cos_y;
                    c.beta += f * sin_x * cos_y;
                    c.gamma += f * cos_x * sin_y;
                    c.delta += f * sin_x * sin_y;
                }
                c.alpha *= norm;
                c.beta *= norm;
                c.gamma *= norm;
                c.delta *= norm;
                coefficients.push(c);
            }
        }

        let weighted = coefficients
            .iter()
            .enumerate()
            .map(|(k, c)| {
                let l = lambda(k / terms.max(1), k % terms.max(1));
                FourierCoefficients {
                    alpha: l * c.alpha,
                    beta: l * c.beta,
                    gamma: l * c.gamma,
                    delta: l * c.delta,
                }
            })
            .collect();

        Self {
            terms,
            angular_frequency: w,
            weighted,
            coefficients,
        }
    }

    #[inline]
    pub fn terms(&self) -> usize {
        self.terms
    }

    #[inline]
    pub fn angular_frequency(&self) -> f64 {
        self.angular_frequency
    }

    /// Raw (un-weighted) coefficients of harmonic `(n, m)`.
    ///
    /// # Panics
    ///
    /// Panics if `n` or `m` is not below [`terms`](Self::terms).
    #[inline]
    pub fn coefficients(&self, n: usize, m: usize) -> FourierCoefficients {
        assert!(n < self.terms && m < self.terms, "harmonic ({n}, {m}) out of range");
        self.coefficients[n * self.terms + m]
    }

    /// Series value at one point.
    pub fn transform(&self, x: f64, y: f64) -> f64 {
        let mut scratch = TrigScratch::new(self.terms);
        self.evaluate(x, y, &mut scratch)
    }

    /// Series value for every row of two input columns.
    pub fn transform_columns(
        &self,
        xs: ArrayView1<'_, f64>,
        ys: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, FourierError> {
        if xs.len() != ys.len() {
            return Err(FourierError::LengthMismatch {
                x: xs.len(),
                y: ys.len(),
            });
        }
        let mut scratch = TrigScratch::new(self.terms);
        Ok(xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| self.evaluate(x, y, &mut scratch))
            .collect())
    }

    fn evaluate(&self, x: f64, y: f64, scratch: &mut TrigScratch) -> f64 {
        scratch.fill(x, y, self.angular_frequency);
        let t = self.terms;

        let mut total = 0.0;
        for n in 0..t {
            let (sin_x, cos_x) = (scratch.sin_x[n], scratch.cos_x[n]);
            let row = &self.weighted[n * t..(n + 1) * t];
            for (m, c) in row.iter().enumerate() {
                let (sin_y, cos_y) = (scratch.sin_y[m], scratch.cos_y[m]);
                total += c.alpha * cos_x * cos_y
                    + c.beta * sin_x * cos_y
                    + c.gamma * cos_x * sin_y
                    + c.delta * sin_x * sin_y;
            }
        }
        total
    }
}

/// Per-row sine/cosine buffers, reused across rows.
struct TrigScratch {
    sin_x: Vec<f64>,
    cos_x: Vec<f64>,
    sin_y: Vec<f64>,
    cos_y: Vec<f64>,
}

impl TrigScratch {
    fn new(terms: usize) -> Self {
        Self {
            sin_x: vec![0.0; terms],
            cos_x: vec![0.0; terms],
            sin_y: vec![0.0; terms],
            cos_y: vec![0.0; terms],
        }
    }

    fn fill(&mut self, x: f64, y: f64, w: f64) {
        for k in 0..self.sin_x.len() {
            let kw = k as f64 * w;
            (self.sin_x[k], self.cos_x[k]) = (kw * x).sin_cos();
            (self.sin_y[k], self.cos_y[k]) = (kw * y).sin_cos();
        }
    }
}
