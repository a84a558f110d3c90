//! Multi-round trees: recursion, root variables and views.

use std::collections::BTreeSet;

use ndarray::{Array1, Array2};

use gmdh::fourier::FourierSeries;
use gmdh::model::{CombinationModel, FitContext, ModelId, ModelInputs};
use gmdh::search::output_matrix;
use gmdh::testing::data::random_features;
use gmdh::Parallelism;

use crate::common::{additive_targets, small_fourier};

struct Fixture {
    train: Array2<f64>,
    test: Array2<f64>,
    train_y: Array1<f64>,
    test_y: Array1<f64>,
    fourier: FourierSeries,
}

fn fixture() -> Fixture {
    let train = random_features(30, 4, 1, -2.0, 2.0);
    let test = random_features(20, 4, 2, -2.0, 2.0);
    Fixture {
        train_y: additive_targets(&train),
        test_y: additive_targets(&test),
        train,
        test,
        fourier: FourierSeries::new(&small_fourier()),
    }
}

/// Leaves over `(0, 1)` and `(2, 3)` and a node combining them.
fn depth_two(f: &Fixture) -> (CombinationModel, Array2<f64>) {
    let ctx = FitContext::new(f.train.view(), f.train_y.view(), f.test.view(), f.test_y.view(), &f.fourier).unwrap();
    let leaves = vec![
        CombinationModel::leaf(ModelId::new(0, 0), 0, 1, &ctx).unwrap(),
        CombinationModel::leaf(ModelId::new(0, 5), 2, 3, &ctx).unwrap(),
    ];

    let train_inputs = output_matrix(&leaves, f.train.view(), Parallelism::Sequential).unwrap();
    let test_inputs = output_matrix(&leaves, f.test.view(), Parallelism::Sequential).unwrap();
    let ctx = FitContext::new(
        train_inputs.view(),
        f.train_y.view(),
        test_inputs.view(),
        f.test_y.view(),
        &f.fourier,
    )
    .unwrap();
    let node = CombinationModel::internal(ModelId::new(1, 0), &leaves[0], &leaves[1], (0, 1), &ctx).unwrap();
    (node, train_inputs)
}

#[test]
fn depth_two_root_variables() {
    let f = fixture();
    let (node, _) = depth_two(&f);

    assert_eq!(node.root_variables(), BTreeSet::from([0, 1, 2, 3]));
    assert_eq!(node.depth(), 2);
    assert_eq!(node.node_count(), 3);
    assert!(!node.is_leaf());
    assert!(matches!(node.inputs(), ModelInputs::Internal { .. }));
}

#[test]
fn shared_variables_are_deduplicated() {
    let f = fixture();
    let ctx = FitContext::new(f.train.view(), f.train_y.view(), f.test.view(), f.test_y.view(), &f.fourier).unwrap();
    let a = CombinationModel::leaf(ModelId::new(0, 0), 0, 1, &ctx).unwrap();
    let b = CombinationModel::leaf(ModelId::new(0, 1), 0, 2, &ctx).unwrap();

    let inputs = output_matrix(&[a.clone(), b.clone()], f.train.view(), Parallelism::Sequential).unwrap();
    let test_inputs = output_matrix(&[a.clone(), b.clone()], f.test.view(), Parallelism::Sequential).unwrap();
    let ctx = FitContext::new(inputs.view(), f.train_y.view(), test_inputs.view(), f.test_y.view(), &f.fourier).unwrap();
    let node = CombinationModel::internal(ModelId::new(1, 0), &a, &b, (0, 1), &ctx).unwrap();

    assert_eq!(node.root_variables().into_iter().collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn recursive_prediction_matches_round_outputs() {
    let f = fixture();
    let (node, train_inputs) = depth_two(&f);

    let recursive = node.predict_rows(f.train.view()).unwrap();
    let from_round = node.outputs(train_inputs.view()).unwrap();
    for (a, b) in recursive.iter().zip(from_round.iter()) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn combined_node_beats_its_children() {
    let f = fixture();
    let (node, _) = depth_two(&f);
    let (left, right) = node.children().unwrap();
    assert!(node.criterion().total() < left.criterion().total());
    assert!(node.criterion().total() < right.criterion().total());
}

#[test]
fn round_view_lists_each_level() {
    let f = fixture();
    let (node, _) = depth_two(&f);
    let rounds = node.rounds();

    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[0].round, 1);
    assert_eq!(rounds[1].nodes.len(), 2);
    assert!(rounds[0].nodes[0].1.starts_with("m1_0 = "));
    assert!(rounds[0].nodes[0].1.contains("m0_0*m0_5"));
    assert!(rounds[1].nodes[1].1.contains("x3*x4"));

    let ids: Vec<_> = rounds[1].nodes.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![ModelId::new(0, 0), ModelId::new(0, 5)]);
}
