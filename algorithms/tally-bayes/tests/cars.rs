// tally-bayes/tests/cars.rs

use approx::assert_abs_diff_eq;
use ndarray::array;
use tally::prelude::*;
use tally_bayes::{cross_validate, CategoricalNb, MultiLabelNb, NaiveBayes};

#[test]
fn stolen_cars_scores() {
    let dataset = tally_datasets::cars();
    let model = CategoricalNb::<f64>::params()
        .smoothing(3.0)
        .fit(&dataset)
        .expect("Training failed");

    assert_eq!(model.class_names(), &["No", "Yes"]);
    assert_abs_diff_eq!(model.prior(0).unwrap(), 0.5);

    let red_domestic_sports = array![1, 0, 1];
    let result = model.classify(red_domestic_sports.view()).unwrap();
    let scores = model.scores(red_domestic_sports.view()).unwrap();
    assert_eq!(result.class, 1);
    assert_eq!(result.name, "Yes");
    assert_abs_diff_eq!(scores[1], 0.0845947265625, epsilon = 1e-12);
    assert_abs_diff_eq!(scores[0], 0.0538330078125, epsilon = 1e-12);
    assert_abs_diff_eq!(result.score, scores[1]);

    let red_domestic_suv = array![1, 1, 1];
    let result = model.classify(red_domestic_suv.view()).unwrap();
    let scores = model.scores(red_domestic_suv.view()).unwrap();
    assert_eq!(result.class, 0);
    assert_eq!(result.name, "No");
    assert_abs_diff_eq!(scores[1], 0.0384521484375, epsilon = 1e-12);
    assert_abs_diff_eq!(scores[0], 0.0692138671875, epsilon = 1e-12);
}

#[test]
fn stolen_cars_predictions_and_validation() {
    let dataset = tally_datasets::cars();
    let mut model = CategoricalNb::<f64>::params().fit(&dataset).unwrap();

    let pred = model.predict(dataset.records()).unwrap();
    let cm = pred.confusion_matrix(&dataset.labels(0).unwrap()).unwrap();
    assert_eq!(cm.total(), 10);

    let result = cross_validate(&mut model, 5).expect("Cross-validation failed");
    let accuracy = result.accuracy();
    assert_eq!(result.total(), 10);
    assert!(
        (0.0..=1.0).contains(&accuracy),
        "accuracy {} outside of [0, 1]",
        accuracy
    );
}

#[test]
fn single_label_ensemble_matches_classifier() {
    let dataset = tally_datasets::cars();
    let single = CategoricalNb::<f64>::params().fit(&dataset).unwrap();
    let ensemble = MultiLabelNb::<f64>::params().fit(&dataset).unwrap();

    for observation in dataset.records().values().outer_iter() {
        let expected = single.classify(observation).unwrap();
        let best = ensemble.classify(observation).unwrap();

        assert_eq!(best.target, 0);
        assert_eq!(best, expected);
    }
}
