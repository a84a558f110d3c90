//! Fitting and scoring single nodes.

use ndarray::{Array1, Array2, Axis};

use gmdh::fourier::FourierSeries;
use gmdh::model::{CombinationModel, FitContext, ModelError, ModelId, QuadraticCoefficients};
use gmdh::testing::data::{quadratic, random_features, QUADRATIC_COEFFICIENTS};

use crate::common::{assert_approx_eq_f64, assert_slice_approx_eq_f64, small_fourier};

fn targets(x: &Array2<f64>, a: usize, b: usize) -> Array1<f64> {
    x.axis_iter(Axis(0))
        .map(|r| quadratic(&QUADRATIC_COEFFICIENTS, r[a], r[b]))
        .collect()
}

#[test]
fn exact_relationship_recovers_coefficients() {
    let x = random_features(20, 2, 1, -3.0, 3.0);
    let y = targets(&x, 0, 1);

    let fitted = QuadraticCoefficients::fit(x.column(0), x.column(1), y.view()).unwrap();
    assert_slice_approx_eq_f64(fitted.values(), &QUADRATIC_COEFFICIENTS, 1e-8, "coefficients");
}

#[test]
fn exact_leaf_scores_near_zero() {
    let fourier = FourierSeries::new(&small_fourier());
    let train = random_features(12, 3, 2, -2.0, 2.0);
    let test = random_features(8, 3, 3, -2.0, 2.0);
    let (ty, vy) = (targets(&train, 0, 2), targets(&test, 0, 2));
    let ctx = FitContext::new(train.view(), ty.view(), test.view(), vy.view(), &fourier).unwrap();

    let leaf = CombinationModel::leaf(ModelId::new(0, 1), 0, 2, &ctx).unwrap();
    assert_approx_eq_f64!(leaf.criterion().total(), 0.0, 1e-12);

    let noisy = CombinationModel::leaf(ModelId::new(0, 0), 0, 1, &ctx).unwrap();
    assert!(noisy.criterion().total() > leaf.criterion().total());
}

#[test]
fn criterion_terms_are_non_negative() {
    let fourier = FourierSeries::new(&small_fourier());
    let train = random_features(15, 4, 4, -1.0, 1.0);
    let test = random_features(10, 4, 5, -1.0, 1.0);
    let ty = random_features(15, 1, 6, -5.0, 5.0).column(0).to_owned();
    let vy = random_features(10, 1, 7, -5.0, 5.0).column(0).to_owned();
    let ctx = FitContext::new(train.view(), ty.view(), test.view(), vy.view(), &fourier).unwrap();

    for k in 0..4 {
        for j in k + 1..4 {
            let leaf = CombinationModel::leaf(ModelId::new(0, 0), k, j, &ctx).unwrap();
            let c = leaf.criterion();
            assert!(c.regularity >= 0.0 && c.unbiasedness >= 0.0);
            assert_approx_eq_f64!(c.total(), c.regularity + c.unbiasedness, 0.0);
        }
    }
}

#[test]
fn duplicated_column_is_unfit() {
    let fourier = FourierSeries::new(&small_fourier());
    let base = random_features(12, 1, 8, -1.0, 1.0);
    let train = ndarray::concatenate![Axis(1), base, base];
    let test = random_features(8, 2, 9, -1.0, 1.0);
    let ty = train.column(0).mapv(|v| 1.0 + v);
    let vy = test.column(0).mapv(|v| 1.0 + v);
    let ctx = FitContext::new(train.view(), ty.view(), test.view(), vy.view(), &fourier).unwrap();

    let err = CombinationModel::leaf(ModelId::new(0, 0), 0, 1, &ctx).unwrap_err();
    assert!(err.is_unfit(), "unexpected error: {err}");
}

#[test]
fn out_of_range_column_is_not_unfit() {
    let fourier = FourierSeries::new(&small_fourier());
    let train = random_features(12, 2, 10, -1.0, 1.0);
    let ty = targets(&train, 0, 1);
    let ctx = FitContext::new(train.view(), ty.view(), train.view(), ty.view(), &fourier).unwrap();

    let err = CombinationModel::leaf(ModelId::new(0, 0), 0, 5, &ctx).unwrap_err();
    assert_eq!(err, ModelError::ColumnOutOfRange { column: 5, n_cols: 2 });
    assert!(!err.is_unfit());
}
