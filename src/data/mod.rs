//! Observations fed to the search.
//!
//! A [`Dataset`] pairs a predictor matrix (rows = observations, columns =
//! variables) with one target per row. A run uses two of them: a training
//! split that every candidate is fitted on and a held-out split that scores
//! it. [`io`] reads them from tab-separated text and writes predictions
//! back out.

mod dataset;
pub mod io;

pub use dataset::{Dataset, DatasetError};
