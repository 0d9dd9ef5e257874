//! Property tests: undo exactness over arbitrary feedback, normalization
//! invariants, and sequence reproducibility.

use std::collections::HashMap;

use proptest::prelude::*;

use ivclass_core::class::DeviceClass;
use ivclass_core::defaults::LEARNING_RATE_KEY;
use ivclass_core::feature::FeatureVector;
use ivclass_validation::{WeightAdjuster, WeightStore};

const FEATURE_NAMES: &[&str] = &[
    "has_hysteresis",
    "switching_behavior",
    "pinched_loop",
    "nonlinear_iv",
    "zero_crossing",
    "retention",
    "linear_clean",
    "constant_resistance",
    "low_hysteresis",
    "symmetric_iv",
    "low_phase_shift",
    "open_loop",
    "no_zero_crossing",
    "frequency_dependence",
    "charge_storage",
    "charge_hysteresis",
    "high_conductance",
    "low_noise",
    "threshold_free",
];

fn class_strategy() -> impl Strategy<Value = DeviceClass> {
    prop::sample::select(DeviceClass::ALL.to_vec())
}

fn feature_vector_strategy() -> impl Strategy<Value = FeatureVector> {
    let bools = prop::collection::hash_map(
        prop::sample::select(FEATURE_NAMES.to_vec()),
        any::<bool>(),
        0..8,
    );
    (bools, -90.0f64..90.0).prop_map(|(bools, phase)| {
        let mut fv = FeatureVector::new();
        for (name, value) in bools {
            fv.insert(name, value);
        }
        fv.insert("phase_shift", phase);
        fv
    })
}

proptest! {
    /// One adjustment followed by undo restores every key, not only the
    /// touched ones.
    #[test]
    fn undo_is_exact_for_any_feedback(
        fv in feature_vector_strategy(),
        predicted in class_strategy(),
        actual in class_strategy(),
        correct in any::<bool>(),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = WeightStore::new(dir.path().join("weights.json"));
        let mut adjuster = WeightAdjuster::new();
        let before = store.get_weights();

        if correct {
            adjuster.adjust_for_correct(&mut store, &fv, predicted).unwrap();
        } else {
            adjuster.adjust_for_incorrect(&mut store, &fv, predicted, actual).unwrap();
        }
        prop_assert!(adjuster.undo_last_adjustment(&mut store).unwrap());
        prop_assert_eq!(store.get_weights(), before);
    }

    /// Identical feedback sequences reach identical weight states.
    #[test]
    fn identical_sequences_reproduce_identical_states(
        fvs in prop::collection::vec(feature_vector_strategy(), 1..5),
        predicted in class_strategy(),
        actual in class_strategy(),
    ) {
        let run = || {
            let dir = tempfile::tempdir().unwrap();
            let mut store = WeightStore::new(dir.path().join("weights.json"));
            let mut adjuster = WeightAdjuster::new();
            for fv in &fvs {
                adjuster.adjust_for_incorrect(&mut store, fv, predicted, actual).unwrap();
            }
            store.get_weights()
        };
        prop_assert_eq!(run(), run());
    }

    /// Normalization makes the scoring weights sum to 100 and never touches
    /// the learning rate.
    #[test]
    fn normalize_sums_to_100_for_any_positive_table(
        scale in 0.01f64..50.0,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = WeightStore::new(dir.path().join("weights.json"));
        let scaled: HashMap<String, f64> = store
            .get_weights()
            .into_iter()
            .filter(|(k, _)| k != LEARNING_RATE_KEY)
            .map(|(k, v)| (k, v * scale))
            .collect();
        store.set_weights(&scaled).unwrap();
        let rate_before = store.get_learning_rate();

        store.normalize_weights().unwrap();

        let sum: f64 = store
            .get_weights()
            .iter()
            .filter(|(k, _)| k.as_str() != LEARNING_RATE_KEY)
            .map(|(_, v)| *v)
            .sum();
        prop_assert!((sum - 100.0).abs() < 1e-6);
        prop_assert_eq!(store.get_learning_rate(), rate_before);
    }
}
