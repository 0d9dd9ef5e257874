//! Prediction records produced by the external batch processor.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::class::DeviceClass;
use crate::feature::FeatureVector;

/// The scored outcome of classifying one measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub device_type: DeviceClass,
    pub score: f64,
}

/// One device's analysis result.
///
/// Lives in an ordered collection owned by the orchestrator; `device_id` is
/// expected to be unique, and lookups take the first match. `error` is set
/// when analysis failed, in which case `features` and `classification` are
/// typically absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub device_id: String,
    pub file_path: PathBuf,
    pub features: Option<FeatureVector>,
    pub classification: Option<Classification>,
    pub error: Option<String>,
}

impl Prediction {
    /// Whether this analysis completed without error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.classification.is_some()
    }
}
