//! Progress reporting for the search.
//!
//! The engine never prints. It reports through a [`SearchObserver`] supplied
//! by the caller; [`SearchLogger`] is the console implementation used by
//! [`GmdhSearch::fit`](super::GmdhSearch::fit) and the binary.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::{RoundSummary, StopReason};

/// Console verbosity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Only problems: rounds losing candidates to singular fits.
    Warning,
    /// Per-round best criterion and the stop reason.
    Info,
    /// Everything, including round starts.
    Debug,
}

/// Receives search progress events.
///
/// All methods default to doing nothing.
pub trait SearchObserver: Send {
    /// Called once before the leaf round.
    fn on_search_start(&mut self, _n_variables: usize, _n_train: usize, _n_test: usize) {}

    /// Called before a round's candidates are generated.
    fn on_round_start(&mut self, _round: usize, _n_inputs: usize) {}

    /// Called after a round's candidates are fitted, scored and judged.
    fn on_round_complete(&mut self, _summary: &RoundSummary) {}

    /// Called once when the search stops; `round` is the final model's round.
    fn on_stop(&mut self, _round: usize, _reason: &StopReason) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Console logger for search progress.
#[derive(Debug)]
pub struct SearchLogger {
    verbosity: Verbosity,
    started: Option<Instant>,
}

impl SearchLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            started: None,
        }
    }

    #[inline]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    #[inline]
    fn enabled(&self, level: Verbosity) -> bool {
        self.verbosity >= level
    }
}

impl SearchObserver for SearchLogger {
    fn on_search_start(&mut self, n_variables: usize, n_train: usize, n_test: usize) {
        self.started = Some(Instant::now());
        if self.enabled(Verbosity::Info) {
            println!(
                "Searching over {} variables ({} train rows, {} test rows)",
                n_variables, n_train, n_test
            );
        }
    }

    fn on_round_start(&mut self, round: usize, n_inputs: usize) {
        if self.enabled(Verbosity::Debug) {
            println!("Round {} - calculating over {} inputs", round, n_inputs);
        }
    }

    fn on_round_complete(&mut self, summary: &RoundSummary) {
        if summary.n_unfit > 0 && self.enabled(Verbosity::Warning) {
            println!(
                "[warning] round {}: {} of {} candidates dropped as unfit",
                summary.round, summary.n_unfit, summary.n_candidates
            );
        }
        if !self.enabled(Verbosity::Info) {
            return;
        }
        match summary.best_criterion {
            Some(best) => println!(
                "Round {} minimum external criterion - {:.6e} ({} models{})",
                summary.round,
                best,
                summary.n_fitted,
                if summary.adopted { "" } else { ", discarded" }
            ),
            None => println!("Round {} produced no fitted models", summary.round),
        }
    }

    fn on_stop(&mut self, round: usize, reason: &StopReason) {
        if !self.enabled(Verbosity::Info) {
            return;
        }
        println!("Stopped at round {}: {}", round, reason);
        if let Some(started) = self.started {
            println!("Time elapsed: {:.3}s", started.elapsed().as_secs_f64());
        }
    }
}
