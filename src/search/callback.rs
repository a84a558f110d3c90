//! Degradation monitor for the round loop.
//!
//! Tracks the best criterion adopted so far and decides whether a freshly
//! generated round improves on it.

/// What to do with a freshly generated round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAction {
    /// The round beats the previous best; adopt it.
    Improved,
    /// The round does not beat the previous best; stop and keep the
    /// previous best model.
    Degraded,
}

/// Degradation state.
///
/// Lower criteria are better. A round counts as an improvement only when
/// its best criterion is below `best - min_improvement`.
///
/// # Example
///
/// ```
/// use gmdh::search::{DegradationMonitor, RoundAction};
///
/// let mut monitor = DegradationMonitor::new(0.0);
/// assert_eq!(monitor.update(Some(0.4)), RoundAction::Improved);
/// assert_eq!(monitor.update(Some(0.1)), RoundAction::Improved);
/// assert_eq!(monitor.update(Some(0.2)), RoundAction::Degraded);
/// assert_eq!(monitor.best_round(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DegradationMonitor {
    /// Required margin of improvement.
    min_improvement: f64,
    /// Best criterion adopted so far.
    best_value: Option<f64>,
    /// Round at which the best value was adopted.
    best_round: usize,
    /// Rounds seen so far.
    current_round: usize,
}

impl DegradationMonitor {
    pub fn new(min_improvement: f64) -> Self {
        Self {
            min_improvement,
            best_value: None,
            best_round: 0,
            current_round: 0,
        }
    }

    /// Record the best criterion of the next round.
    ///
    /// `None` means the round produced no fitted candidate, which never
    /// counts as an improvement.
    pub fn update(&mut self, round_best: Option<f64>) -> RoundAction {
        let round = self.current_round;
        self.current_round += 1;

        let Some(value) = round_best else {
            return RoundAction::Degraded;
        };
        let improved = match self.best_value {
            None => true,
            Some(best) => value < best - self.min_improvement,
        };

        if improved {
            self.best_value = Some(value);
            self.best_round = round;
            RoundAction::Improved
        } else {
            RoundAction::Degraded
        }
    }

    /// Best criterion adopted so far.
    pub fn best_value(&self) -> Option<f64> {
        self.best_value
    }

    /// Round at which the best criterion was adopted.
    pub fn best_round(&self) -> usize {
        self.best_round
    }

    /// Number of rounds recorded.
    pub fn current_round(&self) -> usize {
        self.current_round
    }
}
