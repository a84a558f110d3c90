//! Worker count never changes results.

use rstest::rstest;

use gmdh::fourier::FourierSeries;
use gmdh::model::FitContext;
use gmdh::{run_with_threads, Parallelism};
use gmdh::search::{output_matrix, GmdhSearch, SearchConfig};

use crate::common::{additive_problem, small_fourier};

fn config(n_threads: usize) -> SearchConfig {
    SearchConfig::builder()
        .n_threads(n_threads)
        .fourier(small_fourier())
        .max_rounds(3)
        .build()
        .unwrap()
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(4)]
#[case(7)]
fn search_matches_sequential(#[case] n_threads: usize) {
    let (train, test) = additive_problem(30, 20, 11);

    let sequential = GmdhSearch::new(config(1)).unwrap().fit(&train, &test).unwrap();
    let parallel = GmdhSearch::new(config(n_threads)).unwrap().fit(&train, &test).unwrap();

    assert_eq!(parallel.model_id(), sequential.model_id());
    assert_eq!(parallel.criterion, sequential.criterion);
    assert_eq!(parallel.root_variables, sequential.root_variables);
    assert_eq!(parallel.rounds, sequential.rounds);
    assert_eq!(parallel.stop_reason, sequential.stop_reason);
    assert_eq!(parallel.predictions(), sequential.predictions());
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
fn rounds_are_identical_across_worker_counts(#[case] n_threads: usize) {
    let (train, test) = additive_problem(30, 20, 12);
    let search = GmdhSearch::new(config(n_threads)).unwrap();
    let fourier = FourierSeries::new(&small_fourier());
    let ctx = FitContext::new(
        train.features_view(),
        train.targets(),
        test.features_view(),
        test.targets(),
        &fourier,
    )
    .unwrap();

    let ids_of = |parallelism: Parallelism| {
        let leaves = search.initial_round(&ctx, parallelism).unwrap().candidates;
        let train_inputs = output_matrix(&leaves, train.features_view(), parallelism).unwrap();
        let test_inputs = output_matrix(&leaves, test.features_view(), parallelism).unwrap();
        let round_ctx = FitContext::new(
            train_inputs.view(),
            train.targets(),
            test_inputs.view(),
            test.targets(),
            &fourier,
        )
        .unwrap();
        let round = search.generate_round(1, &leaves, &round_ctx, parallelism).unwrap();
        let leaf_ids: Vec<_> = leaves.iter().map(|m| m.id()).collect();
        let ids: Vec<_> = round.candidates.iter().map(|m| m.id()).collect();
        let criteria: Vec<_> = round.candidates.iter().map(|m| m.criterion().total()).collect();
        (leaf_ids, ids, criteria)
    };

    let expected = run_with_threads(1, ids_of).unwrap();
    let actual = run_with_threads(n_threads, ids_of).unwrap();
    assert_eq!(actual, expected);

    // 6 leaves recombine into at most 15 pairs, each with its own index.
    let (leaf_ids, ids, criteria) = actual;
    assert_eq!(leaf_ids.len(), 6);
    let mut indices: Vec<_> = ids.iter().map(|id| id.index).collect();
    indices.sort_unstable();
    indices.dedup();
    assert_eq!(indices.len(), ids.len());
    assert!(indices.iter().all(|&i| i < 15));
    assert!(criteria.windows(2).all(|w| w[0] <= w[1]));
}
