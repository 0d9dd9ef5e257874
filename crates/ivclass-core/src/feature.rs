//! Feature vectors extracted from IV measurements.
//!
//! Produced by the external batch processor, consumed transiently during
//! feedback. Never persisted by this crate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single extracted feature signal.
///
/// Most features are boolean rule hits; a few (currently only `phase_shift`)
/// are numeric magnitudes. Activity is an explicit predicate rather than
/// ambient truthiness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Number(f64),
}

impl FeatureValue {
    /// Whether this feature fired: a boolean must be true, a numeric value
    /// must be strictly positive.
    pub fn is_active(self) -> bool {
        match self {
            FeatureValue::Bool(b) => b,
            FeatureValue::Number(n) => n > 0.0,
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(b: bool) -> Self {
        FeatureValue::Bool(b)
    }
}

impl From<f64> for FeatureValue {
    fn from(n: f64) -> Self {
        FeatureValue::Number(n)
    }
}

/// Named feature signals for one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(HashMap<String, FeatureValue>);

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FeatureValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        self.0.get(name).copied()
    }

    /// Whether the named feature is present and fired. Absent features never
    /// contribute.
    pub fn is_active(&self, name: &str) -> bool {
        self.get(name).is_some_and(FeatureValue::is_active)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, FeatureValue>> for FeatureVector {
    fn from(map: HashMap<String, FeatureValue>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, FeatureValue)> for FeatureVector {
    fn from_iter<T: IntoIterator<Item = (String, FeatureValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
