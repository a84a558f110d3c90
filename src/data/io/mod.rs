//! Dataset and prediction file I/O.
//!
//! Input files are tab-separated text: one observation per line, predictors
//! first and the target in the last column. Predictions are written one
//! value per line.

mod error;
mod tsv;

pub use error::DatasetLoadError;
pub use tsv::{load_tsv, parse_tsv, write_predictions, write_predictions_to};
