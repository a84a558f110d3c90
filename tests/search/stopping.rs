//! Stop conditions and aborting errors.

use ndarray::{array, Array2};

use gmdh::data::{Dataset, DatasetError};
use gmdh::search::{ConfigError, GmdhSearch, SearchConfig, SearchError, StopReason};
use gmdh::testing::data::{quadratic_problem, random_features};

use crate::common::{additive_problem, fast_config, small_fourier, RecordingObserver};

#[test]
fn max_rounds_zero_keeps_the_best_leaf() {
    let (train, test) = additive_problem(30, 20, 4);
    let config = SearchConfig::builder()
        .n_threads(1)
        .fourier(small_fourier())
        .max_rounds(0)
        .build()
        .unwrap();
    let report = GmdhSearch::new(config).unwrap().fit(&train, &test).unwrap();

    assert_eq!(report.stop_reason, StopReason::MaxRounds { rounds: 0 });
    assert!(report.model.is_leaf());
    assert_eq!(report.rounds.len(), 1);
    assert_eq!(Some(report.criterion.total()), report.rounds[0].best_criterion);
}

#[test]
fn pruning_below_minimum_stops_the_search() {
    // Round 1 recombines all 6 leaves into 15 nodes; pruning keeps 10.
    let (train, test) = additive_problem(40, 30, 3);
    let config = SearchConfig::builder()
        .n_threads(1)
        .fourier(small_fourier())
        .min_survivors(11)
        .max_survivors(20)
        .build()
        .unwrap();
    let report = GmdhSearch::new(config).unwrap().fit(&train, &test).unwrap();

    match report.stop_reason {
        StopReason::InsufficientSurvivors {
            available,
            kept,
            required,
        } => {
            assert_eq!(available, report.rounds[1].n_fitted);
            assert_eq!(kept, available * 2 / 3);
            assert_eq!(required, 11);
        }
        other => panic!("unexpected stop reason: {other}"),
    }
    assert_eq!(report.model_id().round, 1);
    assert_eq!(report.rounds.len(), 2);
}

#[test]
fn survivor_cap_limits_the_next_round() {
    let (train, test) = additive_problem(40, 30, 3);
    let config = SearchConfig::builder()
        .n_threads(1)
        .fourier(small_fourier())
        .max_survivors(4)
        .max_rounds(2)
        .build()
        .unwrap();
    let mut observer = RecordingObserver::default();
    let report = GmdhSearch::new(config)
        .unwrap()
        .fit_with_observer(&train, &test, &mut observer)
        .unwrap();

    assert_eq!(observer.round_starts, vec![(0, 4), (1, 6), (2, 4)]);
    assert_eq!(report.rounds.len(), 3);
    assert_eq!(report.rounds[2].n_candidates, 6);
}

#[test]
fn two_variables_cannot_recombine() {
    let problem = quadratic_problem(12, 8, 2, (0, 1), 21);
    let report = GmdhSearch::new(fast_config(1))
        .unwrap()
        .fit(&problem.train, &problem.test)
        .unwrap();

    assert_eq!(report.stop_reason, StopReason::NoCandidates { n_inputs: 1 });
    assert_eq!(report.root_variables, vec![0, 1]);
    assert!(report.is_valuable());
}

#[test]
fn one_variable_is_an_error() {
    let x = random_features(10, 1, 1, -1.0, 1.0);
    let y = x.column(0).mapv(|v| v * 2.0);
    let data = Dataset::from_arrays(x, y).unwrap();

    let err = GmdhSearch::new(fast_config(1)).unwrap().fit(&data, &data).unwrap_err();
    assert!(matches!(err, SearchError::InsufficientVariables { found: 1 }));
}

#[test]
fn mismatched_splits_are_an_error() {
    let train = quadratic_problem(12, 8, 3, (0, 1), 1).train;
    let test = quadratic_problem(12, 8, 4, (0, 1), 1).test;

    let err = GmdhSearch::new(fast_config(1)).unwrap().fit(&train, &test).unwrap_err();
    assert!(matches!(
        err,
        SearchError::Dataset(DatasetError::FeatureCountMismatch { train: 3, test: 4 })
    ));
}

#[test]
fn no_fittable_leaf_is_an_error() {
    // Fewer rows than coefficients: every leaf is underdetermined.
    let x: Array2<f64> = array![[0.0, 1.0, 2.0], [1.0, 0.5, 0.0], [2.0, 0.1, 1.0]];
    let y = array![1.0, 2.0, 3.0];
    let data = Dataset::from_arrays(x, y).unwrap();

    let err = GmdhSearch::new(fast_config(1)).unwrap().fit(&data, &data).unwrap_err();
    assert!(matches!(err, SearchError::NoViableModels { attempted: 3 }));
}

#[test]
fn invalid_config_is_rejected() {
    let config = SearchConfig {
        min_survivors: 1,
        ..SearchConfig::default()
    };
    let err = GmdhSearch::new(config).unwrap_err();
    assert!(matches!(err, SearchError::Config(ConfigError::InvalidMinSurvivors(1))));
}
