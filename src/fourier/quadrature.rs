//! Gauss–Legendre quadrature on intervals and rectangles.

use std::f64::consts::PI;

const NEWTON_TOLERANCE: f64 = 1e-15;
const MAX_NEWTON_ITERATIONS: usize = 100;

/// An `n`-point Gauss–Legendre rule on `[-1, 1]`.
///
/// Exact for polynomials up to degree `2n - 1`. Nodes are sorted ascending
/// and placed symmetrically around zero.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussLegendre {
    nodes: Vec<f64>,
    weights: Vec<f64>,
}

impl GaussLegendre {
    /// Compute nodes and weights by Newton iteration on `Pₙ`.
    ///
    /// `points == 0` gives an empty rule that integrates everything to zero.
    pub fn new(points: usize) -> Self {
        let n = points;
        let mut nodes = vec![0.0; n];
        let mut weights = vec![0.0; n];

        for i in 0..n.div_ceil(2) {
            // Tricomi-style starting guess for the i-th largest root.
            let mut z = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
            for _ in 0..MAX_NEWTON_ITERATIONS {
                let (p, dp) = legendre_with_derivative(n, z);
                let step = p / dp;
                z -= step;
                if step.abs() <= NEWTON_TOLERANCE {
                    break;
                }
            }
            if 2 * i + 1 == n {
                z = 0.0;
            }

            let (_, dp) = legendre_with_derivative(n, z);
            let w = 2.0 / ((1.0 - z * z) * dp * dp);

            nodes[i] = -z;
            nodes[n - 1 - i] = z;
            weights[i] = w;
            weights[n - 1 - i] = w;
        }

        Self { nodes, weights }
    }

    #[inline]
    pub fn n_points(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// `∫ₐᵇ f(x) dx`.
    pub fn integrate<F: Fn(f64) -> f64>(&self, f: F, a: f64, b: f64) -> f64 {
        let half = 0.5 * (b - a);
        let mid = 0.5 * (a + b);
        let sum: f64 = self
            .nodes
            .iter()
            .zip(&self.weights)
            .map(|(&t, &w)| w * f(mid + half * t))
            .sum();
        sum * half
    }

    /// Tensor-product nodes mapped onto `[a, b] x [c, d]`.
    ///
    /// Yields `(x, y, weight)` with the Jacobian folded into the weight, so
    /// `Σ weight·f(x, y)` approximates the double integral.
    pub fn rectangle_points(
        &self,
        (a, b): (f64, f64),
        (c, d): (f64, f64),
    ) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        let (hx, mx) = (0.5 * (b - a), 0.5 * (a + b));
        let (hy, my) = (0.5 * (d - c), 0.5 * (c + d));
        let jacobian = hx * hy;

        self.nodes.iter().zip(&self.weights).flat_map(move |(&tx, &wx)| {
            self.nodes
                .iter()
                .zip(&self.weights)
                .map(move |(&ty, &wy)| (mx + hx * tx, my + hy * ty, wx * wy * jacobian))
        })
    }

    /// `∬ f(x, y) dx dy` over `[a, b] x [c, d]`.
    pub fn integrate_2d<F: Fn(f64, f64) -> f64>(
        &self,
        f: F,
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> f64 {
        self.rectangle_points(x_range, y_range)
            .map(|(x, y, w)| w * f(x, y))
            .sum()
    }
}

/// `(Pₙ(x), Pₙ'(x))` by the three-term recurrence.
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0;
    let mut p = x;
    for k in 2..=n {
        let k = k as f64;
        let p_next = ((2.0 * k - 1.0) * x * p - (k - 1.0) * p_prev) / k;
        p_prev = p;
        p = p_next;
    }
    let derivative = n as f64 * (x * p - p_prev) / (x * x - 1.0);
    (p, derivative)
}
