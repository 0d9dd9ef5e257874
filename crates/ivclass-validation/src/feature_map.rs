//! Static class → (feature, weight-key) contribution table.
//!
//! For each device class, the features whose firing contributes to that
//! class's score and the weight key holding the contribution's magnitude.
//! `phase_shift` is the one numeric feature; everything else is boolean.
//! Firing is decided by [`FeatureValue::is_active`](ivclass_core::FeatureValue::is_active).

use ivclass_core::class::DeviceClass;

/// `(feature_name, weight_key)` pairs for one class.
pub type Contribution = (&'static str, &'static str);

const MEMRISTIVE: &[Contribution] = &[
    ("has_hysteresis", "memristive_has_hysteresis"),
    ("switching_behavior", "memristive_switching_behavior"),
    ("pinched_loop", "memristive_pinched_loop"),
    ("nonlinear_iv", "memristive_nonlinear_iv"),
    ("zero_crossing", "memristive_zero_crossing"),
    ("retention", "memristive_retention"),
];

const OHMIC: &[Contribution] = &[
    ("linear_clean", "ohmic_linear_clean"),
    ("constant_resistance", "ohmic_constant_resistance"),
    ("low_hysteresis", "ohmic_low_hysteresis"),
    ("symmetric_iv", "ohmic_symmetric_iv"),
    ("low_phase_shift", "ohmic_low_phase_shift"),
];

const CAPACITIVE: &[Contribution] = &[
    ("phase_shift", "capacitive_phase_shift"),
    ("open_loop", "capacitive_open_loop"),
    ("no_zero_crossing", "capacitive_no_zero_crossing"),
    ("frequency_dependence", "capacitive_frequency_dependence"),
    ("charge_storage", "capacitive_charge_storage"),
];

const MEMCAPACITIVE: &[Contribution] = &[
    ("phase_shift", "memcapacitive_phase_shift"),
    ("pinched_loop", "memcapacitive_pinched_loop"),
    ("charge_hysteresis", "memcapacitive_charge_hysteresis"),
    ("nonlinear_iv", "memcapacitive_nonlinear_iv"),
    ("frequency_dependence", "memcapacitive_frequency_dependence"),
];

const CONDUCTIVE: &[Contribution] = &[
    ("high_conductance", "conductive_high_conductance"),
    ("linear_clean", "conductive_linear_clean"),
    ("constant_resistance", "conductive_constant_resistance"),
    ("low_noise", "conductive_low_noise"),
    ("threshold_free", "conductive_threshold_free"),
];

/// The contribution table for one class.
pub fn contributions(class: DeviceClass) -> &'static [Contribution] {
    match class {
        DeviceClass::Memristive => MEMRISTIVE,
        DeviceClass::Ohmic => OHMIC,
        DeviceClass::Capacitive => CAPACITIVE,
        DeviceClass::Memcapacitive => MEMCAPACITIVE,
        DeviceClass::Conductive => CONDUCTIVE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivclass_core::defaults;

    #[test]
    fn every_mapped_weight_key_is_known() {
        for class in DeviceClass::ALL {
            for (feature, key) in contributions(class) {
                assert!(
                    defaults::is_known_weight(key),
                    "class {class} maps feature {feature} to unknown key {key}"
                );
            }
        }
    }

    #[test]
    fn every_class_has_contributions() {
        for class in DeviceClass::ALL {
            assert!(!contributions(class).is_empty());
        }
    }
}
