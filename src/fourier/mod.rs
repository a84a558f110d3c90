//! Truncated 2-D Fourier feature transform.
//!
//! Each candidate node derives one scalar per data row from its two inputs
//! `(x, y)` by evaluating a truncated double Fourier series of `x + y` over
//! the square `[-P, P]²`:
//!
//! ```text
//! f(x, y) = Σₙ Σₘ λ(n, m) · (αₙₘ·cc + βₙₘ·sc + γₙₘ·cs + δₙₘ·ss)
//!
//! cc = cos(nwx)·cos(mwy)    sc = sin(nwx)·cos(mwy)
//! cs = cos(nwx)·sin(mwy)    ss = sin(nwx)·sin(mwy)       w = 2π / P
//! ```
//!
//! The coefficients are `1/P² ∬ (x + y)·basis dx dy`, integrated with a
//! tensor-product Gauss–Legendre rule whose nodes vary over the whole
//! domain. They do not depend on the data row, so [`FourierSeries`]
//! computes the table once and every worker shares it read-only.
//!
//! The defaults (20 terms per axis, 32 quadrature points per axis, a
//! 365-day period) are exposed through [`FourierConfig`] because changing
//! them changes every derived feature.

mod quadrature;
mod series;

pub use quadrature::GaussLegendre;
pub use series::{FourierCoefficients, FourierSeries};

use serde::{Deserialize, Serialize};

/// Default truncation order per axis.
pub const DEFAULT_TERMS: usize = 20;

/// Default Gauss–Legendre points per axis.
pub const DEFAULT_QUADRATURE_POINTS: usize = 32;

/// Default period: one year of daily observations.
pub const DEFAULT_PERIOD: f64 = 365.0;

/// Constants of the Fourier feature transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FourierConfig {
    /// Number of harmonics per axis; `n` and `m` range over `0..terms`.
    pub terms: usize,

    /// Gauss–Legendre points per axis (the 2-D rule uses `points²` nodes).
    pub quadrature_points: usize,

    /// Period `P`; the base angular frequency is `2π / P` and the
    /// integration domain is `[-P, P]²`.
    pub period: f64,
}

impl Default for FourierConfig {
    fn default() -> Self {
        Self {
            terms: DEFAULT_TERMS,
            quadrature_points: DEFAULT_QUADRATURE_POINTS,
            period: DEFAULT_PERIOD,
        }
    }
}

impl FourierConfig {
    /// Base angular frequency `w = 2π / P`.
    #[inline]
    pub fn angular_frequency(&self) -> f64 {
        2.0 * std::f64::consts::PI / self.period
    }
}

/// Errors raised by the transform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FourierError {
    #[error("input columns differ in length: x has {x} rows, y has {y}")]
    LengthMismatch { x: usize, y: usize },
}

/// Normalisation weight of harmonic `(n, m)` in a double Fourier series.
///
/// `1/4` for the constant term, `1/2` when exactly one index is zero, `1`
/// otherwise.
#[inline]
pub fn lambda(n: usize, m: usize) -> f64 {
    match (n, m) {
        (0, 0) => 0.25,
        (0, _) | (_, 0) => 0.5,
        _ => 1.0,
    }
}
