//! Compiled default weight and threshold tables.
//!
//! These are the reset targets for [`reset_to_defaults`] and the fallback
//! when a persisted config file is missing or corrupt. The key set is closed:
//! mutation paths validate names against these tables.

use std::collections::HashMap;

/// Pseudo-weight controlling the feedback step size.
pub const LEARNING_RATE_KEY: &str = "adjustment_learning_rate";

/// Default feedback step size.
pub const DEFAULT_LEARNING_RATE: f64 = 5.0;

/// Default score contribution per class-feature rule.
///
/// Keys are `<class>_<feature>`. The table covers all five scorable classes,
/// including memcapacitive (which is scorable but not labelable by default).
pub const DEFAULT_WEIGHTS: &[(&str, f64)] = &[
    // Memristive
    ("memristive_has_hysteresis", 25.0),
    ("memristive_switching_behavior", 20.0),
    ("memristive_pinched_loop", 20.0),
    ("memristive_nonlinear_iv", 10.0),
    ("memristive_zero_crossing", 10.0),
    ("memristive_retention", 5.0),
    // Ohmic
    ("ohmic_linear_clean", 25.0),
    ("ohmic_constant_resistance", 20.0),
    ("ohmic_low_hysteresis", 15.0),
    ("ohmic_symmetric_iv", 10.0),
    ("ohmic_low_phase_shift", 5.0),
    // Capacitive
    ("capacitive_phase_shift", 25.0),
    ("capacitive_open_loop", 20.0),
    ("capacitive_no_zero_crossing", 15.0),
    ("capacitive_frequency_dependence", 10.0),
    ("capacitive_charge_storage", 10.0),
    // Memcapacitive
    ("memcapacitive_phase_shift", 20.0),
    ("memcapacitive_pinched_loop", 20.0),
    ("memcapacitive_charge_hysteresis", 20.0),
    ("memcapacitive_nonlinear_iv", 10.0),
    ("memcapacitive_frequency_dependence", 10.0),
    // Conductive
    ("conductive_high_conductance", 25.0),
    ("conductive_linear_clean", 15.0),
    ("conductive_constant_resistance", 10.0),
    ("conductive_low_noise", 10.0),
    ("conductive_threshold_free", 5.0),
    // Learning rate pseudo-weight
    (LEARNING_RATE_KEY, DEFAULT_LEARNING_RATE),
];

/// Default decision thresholds. No cross-threshold ordering is enforced.
pub const DEFAULT_THRESHOLDS: &[(&str, f64)] = &[
    ("classification_min_score", 30.0),
    ("hysteresis_area_min", 0.05),
    ("phase_shift_min_degrees", 10.0),
    ("linear_fit_r2_min", 0.98),
];

/// Fresh copy of the compiled default weight table.
pub fn default_weights() -> HashMap<String, f64> {
    DEFAULT_WEIGHTS
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect()
}

/// Fresh copy of the compiled default threshold table.
pub fn default_thresholds() -> HashMap<String, f64> {
    DEFAULT_THRESHOLDS
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect()
}

/// Compiled default for a single weight key, if the key is known.
pub fn default_weight(name: &str) -> Option<f64> {
    DEFAULT_WEIGHTS
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| *v)
}

/// Compiled default for a single threshold key, if the key is known.
pub fn default_threshold(name: &str) -> Option<f64> {
    DEFAULT_THRESHOLDS
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| *v)
}

pub fn is_known_weight(name: &str) -> bool {
    default_weight(name).is_some()
}

pub fn is_known_threshold(name: &str) -> bool {
    default_threshold(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_table_has_no_duplicate_keys() {
        let map = default_weights();
        assert_eq!(map.len(), DEFAULT_WEIGHTS.len());
    }

    #[test]
    fn hysteresis_and_learning_rate_defaults() {
        assert_eq!(default_weight("memristive_has_hysteresis"), Some(25.0));
        assert_eq!(default_weight(LEARNING_RATE_KEY), Some(5.0));
    }

    #[test]
    fn threshold_table_has_four_keys() {
        assert_eq!(default_thresholds().len(), 4);
    }
}
