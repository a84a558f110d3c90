//! Search configuration with builder pattern.
//!
//! [`SearchConfig`] uses the `bon` crate for builder generation; the
//! finishing `build()` validates every field.
//!
//! # Example
//!
//! ```
//! use gmdh::search::SearchConfig;
//!
//! // All defaults
//! let config = SearchConfig::builder().build().unwrap();
//! assert_eq!(config.survivor_count(30), 20);
//!
//! // Four workers, at most three rounds after the leaves
//! let config = SearchConfig::builder()
//!     .n_threads(4)
//!     .max_rounds(3)
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::Verbosity;
use crate::fourier::FourierConfig;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Survivor fraction must lie in (0, 1].
    InvalidSurvivorFraction { numerator: usize, denominator: usize },
    /// At least two survivors are needed to form a pair.
    InvalidMinSurvivors(usize),
    /// The survivor cap must not be below the minimum.
    InvalidMaxSurvivors { max: usize, min: usize },
    /// Improvement margin must be finite and non-negative.
    InvalidMinImprovement(f64),
    /// Valuable threshold must be finite.
    InvalidValuableThreshold(f64),
    /// Invalid Fourier transform constant.
    InvalidFourier { field: &'static str, value: f64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSurvivorFraction {
                numerator,
                denominator,
            } => write!(
                f,
                "survivor fraction must be in (0, 1], got {}/{}",
                numerator, denominator
            ),
            Self::InvalidMinSurvivors(v) => write!(f, "min_survivors must be at least 2, got {}", v),
            Self::InvalidMaxSurvivors { max, min } => write!(
                f,
                "max_survivors ({}) must be at least min_survivors ({})",
                max, min
            ),
            Self::InvalidMinImprovement(v) => {
                write!(f, "min_improvement must be finite and non-negative, got {}", v)
            }
            Self::InvalidValuableThreshold(v) => {
                write!(f, "valuable_threshold must be finite, got {}", v)
            }
            Self::InvalidFourier { field, value } => {
                write!(f, "fourier.{} is invalid: {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// SearchConfig
// =============================================================================

/// Configuration of a GMDH search.
///
/// # Structure
///
/// - **Resources**: `n_threads`
/// - **Feature transform**: `fourier`
/// - **Pruning**: survivor fraction, cap and minimum
/// - **Stopping**: `min_improvement`, `max_rounds`
/// - **Reporting**: `valuable_threshold`, `verbosity`
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
#[serde(default)]
pub struct SearchConfig {
    // === Resource control ===
    /// Number of worker threads. `0` uses all available cores, `1` runs
    /// sequentially. Default: 0.
    #[builder(default)]
    pub n_threads: usize,

    // === Feature transform ===
    /// Fourier transform constants. Default: 20 terms, 32 points, period 365.
    #[builder(default)]
    pub fourier: FourierConfig,

    // === Pruning ===
    /// Numerator of the fraction of models kept between rounds. Default: 2.
    #[builder(default = 2)]
    pub survivor_numerator: usize,

    /// Denominator of the fraction of models kept between rounds. Default: 3.
    #[builder(default = 3)]
    pub survivor_denominator: usize,

    /// Upper bound on models kept between rounds. Default: 100.
    #[builder(default = 100)]
    pub max_survivors: usize,

    /// The search stops when pruning would keep fewer models. Default: 3.
    #[builder(default = 3)]
    pub min_survivors: usize,

    // === Stopping ===
    /// A new round is adopted only if its best criterion beats the previous
    /// best by more than this margin. Default: 1e-10.
    ///
    /// The margin is absolute, not relative. Once the best criterion is
    /// itself near zero, a round within this margin of it counts as no
    /// improvement and stops the search. Set it to `0.0` to adopt any
    /// strictly smaller criterion.
    #[builder(default = 1e-10)]
    pub min_improvement: f64,

    /// Maximum number of rounds generated after the leaf round. `None`
    /// means unbounded.
    pub max_rounds: Option<usize>,

    // === Reporting ===
    /// A final criterion below this marks the model as valuable.
    /// Default: 0.05.
    #[builder(default = 0.05)]
    pub valuable_threshold: f64,

    /// Console verbosity of the default logger. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

/// Custom finishing function that validates the config.
impl<S: search_config_builder::IsComplete> SearchConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any parameter is invalid.
    pub fn build(self) -> Result<SearchConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl SearchConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.survivor_denominator == 0
            || self.survivor_numerator == 0
            || self.survivor_numerator > self.survivor_denominator
        {
            return Err(ConfigError::InvalidSurvivorFraction {
                numerator: self.survivor_numerator,
                denominator: self.survivor_denominator,
            });
        }

        if self.min_survivors < 2 {
            return Err(ConfigError::InvalidMinSurvivors(self.min_survivors));
        }
        if self.max_survivors < self.min_survivors {
            return Err(ConfigError::InvalidMaxSurvivors {
                max: self.max_survivors,
                min: self.min_survivors,
            });
        }

        if !self.min_improvement.is_finite() || self.min_improvement < 0.0 {
            return Err(ConfigError::InvalidMinImprovement(self.min_improvement));
        }
        if !self.valuable_threshold.is_finite() {
            return Err(ConfigError::InvalidValuableThreshold(self.valuable_threshold));
        }

        let fourier = &self.fourier;
        if fourier.terms == 0 {
            return Err(ConfigError::InvalidFourier {
                field: "terms",
                value: 0.0,
            });
        }
        if fourier.quadrature_points == 0 {
            return Err(ConfigError::InvalidFourier {
                field: "quadrature_points",
                value: 0.0,
            });
        }
        if !fourier.period.is_finite() || fourier.period <= 0.0 {
            return Err(ConfigError::InvalidFourier {
                field: "period",
                value: fourier.period,
            });
        }

        Ok(())
    }

    /// How many of `n` ranked models survive into the next round.
    ///
    /// `min(⌊n · numerator / denominator⌋, max_survivors)`.
    #[inline]
    pub fn survivor_count(&self, n: usize) -> usize {
        (n * self.survivor_numerator / self.survivor_denominator).min(self.max_survivors)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::builder().__build_internal()
    }
}

// =============================================================================
// Tests
// =============================================================================
