//! Shared error types for dataset I/O.

use std::io;

use crate::data::DatasetError;

/// Errors that can occur when loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetLoadError {
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	#[error("line {line}, column {column}: cannot parse {token:?} as a number")]
	Parse {
		line: usize,
		column: usize,
		token: String,
	},

	#[error("line {line}: expected {expected} values, got {got}")]
	RaggedRow {
		line: usize,
		expected: usize,
		got: usize,
	},

	#[error("line {line}: need at least one predictor and a target, got {got} values")]
	TooFewColumns { line: usize, got: usize },

	#[error("no data rows")]
	Empty,

	#[error(transparent)]
	Dataset(#[from] DatasetError),
}
