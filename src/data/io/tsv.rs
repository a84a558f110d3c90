//! Tab-separated dataset reader and prediction writer.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use ndarray::{Array1, Array2};

use super::DatasetLoadError;
use crate::data::Dataset;

/// Read a dataset from tab-separated text.
///
/// Blank lines are skipped and empty tokens (doubled tabs, trailing tabs)
/// are ignored. The first data line fixes the column count; the last column
/// is the target.
pub fn parse_tsv<R: BufRead>(reader: R) -> Result<Dataset, DatasetLoadError> {
	let mut width = None;
	let mut values = Vec::new();
	let mut n_rows = 0;

	for (i, line) in reader.lines().enumerate() {
		let line = line?;
		let line_no = i + 1;

		let tokens: Vec<&str> = line.split('\t').map(str::trim).filter(|t| !t.is_empty()).collect();
		if tokens.is_empty() {
			continue;
		}

		let expected = *width.get_or_insert(tokens.len());
		if expected < 2 {
			return Err(DatasetLoadError::TooFewColumns {
				line: line_no,
				got: expected,
			});
		}
		if tokens.len() != expected {
			return Err(DatasetLoadError::RaggedRow {
				line: line_no,
				expected,
				got: tokens.len(),
			});
		}

		for (column, token) in tokens.iter().enumerate() {
			let value: f64 = token.parse().map_err(|_| DatasetLoadError::Parse {
				line: line_no,
				column: column + 1,
				token: (*token).to_string(),
			})?;
			values.push(value);
		}
		n_rows += 1;
	}

	let width = width.ok_or(DatasetLoadError::Empty)?;
	let table = Array2::from_shape_vec((n_rows, width), values)
		.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

	let n_features = width - 1;
	let features = table.slice(ndarray::s![.., ..n_features]).to_owned();
	let targets: Array1<f64> = table.column(n_features).to_owned();
	Ok(Dataset::from_arrays(features, targets)?)
}

/// Read a dataset from a tab-separated file.
pub fn load_tsv(path: impl AsRef<Path>) -> Result<Dataset, DatasetLoadError> {
	let file = File::open(path)?;
	parse_tsv(BufReader::new(file))
}

/// Write predictions one per line.
pub fn write_predictions_to<W: Write>(writer: W, predictions: &[f64]) -> io::Result<()> {
	let mut writer = BufWriter::new(writer);
	for p in predictions {
		writeln!(writer, "{p}")?;
	}
	writer.flush()
}

/// Write predictions one per line to `path`, replacing any existing file.
pub fn write_predictions(path: impl AsRef<Path>, predictions: &[f64]) -> io::Result<()> {
	write_predictions_to(File::create(path)?, predictions)
}
