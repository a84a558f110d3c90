//! Full searches on synthetic problems with a known answer.

use std::fs;
use std::io::Write;

use gmdh::data::io::{load_tsv, write_predictions};
use gmdh::search::{GmdhSearch, SearchConfig, StopReason};
use gmdh::testing::data::quadratic_problem;

use crate::common::{additive_problem, fast_config, RecordingObserver};

#[test]
fn finds_the_two_signal_variables() {
    // 4 variables, 20 rows: y = 2 + 3*x0 - x2 + 0.5*x0*x2, x1 and x3 are noise.
    let problem = quadratic_problem(12, 8, 4, (0, 2), 17);
    let search = GmdhSearch::new(fast_config(1)).unwrap();
    let report = search.fit(&problem.train, &problem.test).unwrap();

    assert_eq!(report.root_variables, vec![0, 2]);
    assert!(report.criterion.total() < 0.05);
    assert!(report.is_valuable());

    // The exact leaf cannot be beaten by a meaningful margin.
    assert!(report.model.is_leaf());
    assert!(matches!(report.stop_reason, StopReason::Degraded { round: 1, .. }));
    assert_eq!(report.rounds.len(), 2);
    assert!(report.rounds[0].adopted);
    assert!(!report.rounds[1].adopted);
    assert_eq!(Some(report.model_id()), report.rounds[0].best_model);
    assert_eq!(Some(report.criterion.total()), report.rounds[0].best_criterion);
}

#[test]
fn predictions_cover_train_then_test() {
    let problem = quadratic_problem(12, 8, 4, (1, 3), 5);
    let report = GmdhSearch::new(fast_config(1))
        .unwrap()
        .fit(&problem.train, &problem.test)
        .unwrap();

    let predictions = report.predictions();
    assert_eq!(predictions.len(), 20);

    let train_targets = problem.train.targets();
    let test_targets = problem.test.targets();
    let targets = train_targets.iter().chain(test_targets.iter());
    for (p, t) in predictions.iter().zip(targets) {
        assert!((p - t).abs() < 1e-6, "prediction {p} vs target {t}");
    }
}

#[test]
fn default_fourier_table_gives_the_same_answer() {
    let problem = quadratic_problem(12, 8, 4, (0, 2), 17);
    let report = GmdhSearch::new(SearchConfig::default())
        .unwrap()
        .fit(&problem.train, &problem.test)
        .unwrap();
    assert_eq!(report.root_variables, vec![0, 2]);
}

#[test]
fn recombination_beats_every_leaf() {
    let (train, test) = additive_problem(40, 30, 3);
    let mut observer = RecordingObserver::default();
    let report = GmdhSearch::new(fast_config(1))
        .unwrap()
        .fit_with_observer(&train, &test, &mut observer)
        .unwrap();

    assert!(report.model_id().round >= 1);
    assert_eq!(report.root_variables, vec![0, 1, 2, 3]);

    let leaf_best = report.rounds[0].best_criterion.unwrap();
    assert!(report.criterion.total() < leaf_best);
}

#[test]
fn observer_sees_every_round() {
    let problem = quadratic_problem(12, 8, 4, (0, 2), 17);
    let mut observer = RecordingObserver::default();
    let report = GmdhSearch::new(fast_config(1))
        .unwrap()
        .fit_with_observer(&problem.train, &problem.test, &mut observer)
        .unwrap();

    assert_eq!(observer.started, Some((4, 12, 8)));
    assert_eq!(observer.round_starts, vec![(0, 4), (1, 6)]);
    assert_eq!(observer.summaries, report.rounds);
    assert_eq!(observer.stops, vec![(0, report.stop_reason.clone())]);

    let leaves = &observer.summaries[0];
    assert_eq!(leaves.n_candidates, 6);
    assert_eq!(leaves.n_fitted + leaves.n_unfit, 6);
}

#[test]
fn files_in_predictions_out() {
    let problem = quadratic_problem(12, 8, 4, (0, 2), 17);
    let dir = tempfile::tempdir().unwrap();

    let write_split = |name: &str, data: &gmdh::Dataset| {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        for (row, y) in data.features_view().rows().into_iter().zip(data.targets().iter()) {
            for x in row.iter() {
                write!(file, "{x}\t").unwrap();
            }
            writeln!(file, "{y}").unwrap();
        }
        path
    };
    let train_path = write_split("train.txt", &problem.train);
    let test_path = write_split("test.txt", &problem.test);

    let train = load_tsv(&train_path).unwrap();
    let test = load_tsv(&test_path).unwrap();
    assert_eq!(train, problem.train);

    let report = GmdhSearch::new(fast_config(2)).unwrap().fit(&train, &test).unwrap();
    let out = dir.path().join("result.txt");
    write_predictions(&out, &report.predictions().to_vec()).unwrap();

    let written = fs::read_to_string(&out).unwrap();
    let values: Vec<f64> = written.lines().map(|l| l.parse().unwrap()).collect();
    assert_eq!(values.len(), 20);
    assert_eq!(values, report.predictions().to_vec());
}
