//! Command-line front end for the search.
//!
//! Loads a train and a test tab-separated file (last column is the target),
//! runs the search and writes one prediction per line for every train row
//! followed by every test row.
//!
//! Examples:
//!   `cargo run --bin gmdh_search --release -- --train train.txt --test test.txt`
//!   `cargo run --bin gmdh_search --release -- --train train.txt --test test.txt --threads 4 --report report.json --verbose`

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use gmdh::data::io::{load_tsv, write_predictions};
use gmdh::{GmdhSearch, SearchConfig, Verbosity};

#[derive(Debug)]
struct Args {
	train: PathBuf,
	test: PathBuf,
	threads: usize,
	out: PathBuf,
	report: Option<PathBuf>,
	verbosity: Verbosity,
}

fn parse_args() -> Result<Args, String> {
	let mut train = None;
	let mut test = None;
	let mut threads = 0usize;
	let mut out = PathBuf::from("result.txt");
	let mut report = None;
	let mut verbosity = Verbosity::Info;

	let mut it = std::env::args().skip(1);
	while let Some(arg) = it.next() {
		let mut value = |name: &str| it.next().ok_or_else(|| format!("{name} requires a value"));
		match arg.as_str() {
			"--train" => train = Some(PathBuf::from(value("--train")?)),
			"--test" => test = Some(PathBuf::from(value("--test")?)),
			"--threads" => {
				let v = value("--threads")?;
				threads = v.parse().map_err(|_| format!("--threads expects a count, got '{v}'"))?;
			}
			"--out" => out = PathBuf::from(value("--out")?),
			"--report" => report = Some(PathBuf::from(value("--report")?)),
			"--verbose" => verbosity = Verbosity::Debug,
			"--quiet" => verbosity = Verbosity::Silent,
			"--help" => print_help_and_exit(),
			other => return Err(format!("unknown argument '{other}' (see --help)")),
		}
	}

	Ok(Args {
		train: train.ok_or("--train is required")?,
		test: test.ok_or("--test is required")?,
		threads,
		out,
		report,
		verbosity,
	})
}

fn print_help_and_exit() -> ! {
	eprintln!(
		"gmdh_search\n\n  Data:\n    --train <path> (tab-separated, last column is the target)\n    --test <path>\n\n  Search:\n    --threads <n> (0 = all cores, 1 = sequential; default 0)\n\n  Output:\n    --out <path> (predictions, default result.txt)\n    --report <path> (JSON report)\n    --verbose | --quiet\n"
	);
	std::process::exit(0)
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
	let train = load_tsv(&args.train)?;
	let test = load_tsv(&args.test)?;

	let config = SearchConfig::builder()
		.n_threads(args.threads)
		.verbosity(args.verbosity)
		.build()?;
	let report = GmdhSearch::new(config)?.fit(&train, &test)?;

	let id = report.model_id();
	println!("Best model: Model #{}_{}", id.round, id.index + 1);
	println!(
		"External criterion: {:.6e} (regularity {:.6e}, unbiasedness {:.6e})",
		report.criterion.total(),
		report.criterion.regularity,
		report.criterion.unbiasedness
	);
	if report.is_valuable() {
		println!("Model is valuable (criterion below {})", report.valuable_threshold);
	} else {
		println!("Model is not valuable (criterion not below {})", report.valuable_threshold);
	}

	let roots: Vec<String> = report.root_variables.iter().map(|i| format!("x{}", i + 1)).collect();
	println!("Root variables: {}", roots.join(", "));
	print!("{}", report.tree_view());

	write_predictions(&args.out, &report.predictions().to_vec())?;
	println!("Predictions written to {}", args.out.display());

	if let Some(path) = &args.report {
		fs::write(path, report.to_json()?)?;
		println!("Report written to {}", path.display());
	}
	Ok(())
}

fn main() {
	let args = match parse_args() {
		Ok(args) => args,
		Err(e) => {
			eprintln!("error: {e}");
			std::process::exit(2);
		}
	};
	if let Err(e) = run(args) {
		eprintln!("error: {e}");
		std::process::exit(1);
	}
}
