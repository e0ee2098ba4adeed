//! Property-based tests for attrition-rs using proptest.
//!
//! These tests verify core invariants:
//! - Determinism: scoring the same record twice gives the same label
//! - Isolation: scoring never changes the loaded artifacts
//! - Payload handling: key order and numeric-string encoding do not matter
//! - Metrics: every summary ratio stays in `[0, 1]`
//! - Range: records far outside the fitted ranges still get a label

use attrition_rs::metrics::ConfusionCounts;
use attrition_rs::{Attrition, FeatureRecord, ScoringModel, FEATURE_COUNT, FEATURE_NAMES};
use proptest::prelude::*;
use serde_json::{Map, Value};
use std::path::Path;

fn load_bundled() -> ScoringModel {
    let data = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../data"));
    ScoringModel::load(&data.join("attrition.model"), &data.join("attrition.range"))
        .expect("Failed to load bundled artifacts")
}

/// Values inside (and a little beyond) the ranges the scaler was fit on.
fn record_strategy() -> impl Strategy<Value = [f64; FEATURE_COUNT]> {
    prop::array::uniform15(-100.0f64..25_000.0)
}

fn payload_of(values: &[f64; FEATURE_COUNT]) -> Map<String, Value> {
    FEATURE_NAMES
        .iter()
        .zip(values)
        .map(|(name, v)| (name.to_string(), serde_json::json!(v)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prediction_is_deterministic(values in record_strategy()) {
        let model = load_bundled();
        let record = FeatureRecord::from_values(values);
        let first = model.predict(&record).unwrap();
        let second = model.predict(&record).unwrap();
        prop_assert_eq!(first, second);
        prop_assert!(matches!(first, Attrition::Yes | Attrition::No));
    }

    #[test]
    fn scoring_does_not_mutate_artifacts(values in record_strategy()) {
        let model = load_bundled();
        let before = model.clone();
        let _ = model.predict(&FeatureRecord::from_values(values)).unwrap();
        prop_assert_eq!(model, before);
    }

    #[test]
    fn json_and_record_paths_agree(values in record_strategy()) {
        let model = load_bundled();
        let direct = model.predict(&FeatureRecord::from_values(values)).unwrap();
        let via_json = model.predict_json(&payload_of(&values)).unwrap();
        prop_assert_eq!(direct, via_json);
    }

    #[test]
    fn integer_strings_score_like_numbers(ints in prop::array::uniform15(0i32..20_000)) {
        let model = load_bundled();
        let values = ints.map(f64::from);
        let as_strings: Map<String, Value> = FEATURE_NAMES
            .iter()
            .zip(&ints)
            .map(|(name, v)| (name.to_string(), Value::String(v.to_string())))
            .collect();
        let expected = model.predict(&FeatureRecord::from_values(values)).unwrap();
        prop_assert_eq!(model.predict_json(&as_strings).unwrap(), expected);
    }

    #[test]
    fn far_out_of_range_records_get_a_label(values in prop::array::uniform15(-1.0e306f64..1.0e306)) {
        let model = load_bundled();
        prop_assert!(model.predict(&FeatureRecord::from_values(values)).is_ok());
    }

    #[test]
    fn metrics_stay_in_unit_interval(pairs in prop::collection::vec((any::<bool>(), any::<bool>()), 1..200)) {
        let to_label = |b: bool| if b { Attrition::Yes } else { Attrition::No };
        let counts = ConfusionCounts::from_pairs(pairs.iter().map(|&(t, p)| (to_label(t), to_label(p))));
        let report = counts.report();
        prop_assert_eq!(counts.total(), pairs.len());
        for m in [report.accuracy, report.precision, report.recall, report.f1] {
            prop_assert!((0.0..=1.0).contains(&m), "metric out of range: {}", m);
        }
        if pairs.iter().all(|(t, p)| t == p) {
            prop_assert_eq!(report.f1, 1.0);
        }
    }
}

/// The artifacts the server ships with are the ones the tests score against.
#[test]
fn shipped_artifacts_score_like_test_fixtures() {
    let root = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../.."));
    let shipped = ScoringModel::load(
        &root.join("model").join("attrition.model"),
        &root.join("model").join("attrition.range"),
    )
    .unwrap();
    let fixtures = load_bundled();
    assert_eq!(shipped, fixtures);

    for age in [18.0, 25.0, 39.0, 52.0, 60.0] {
        for income in [1000.0, 4000.0, 12000.0, 20000.0, 1.0e308] {
            let record = FeatureRecord::from_values([
                age, 800.0, 5.0, 3.0, 2.0, 2.0, 2.0, 2.0, income, 2.0, 14.0, 3.0, 10.0, 3.0, 5.0,
            ]);
            assert_eq!(shipped.predict(&record).unwrap(), fixtures.predict(&record).unwrap());
        }
    }
}
