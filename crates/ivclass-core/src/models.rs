//! Result models exchanged with the UI layer and the metrics collaborator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-class accuracy metrics as computed by the external metrics calculator.
///
/// `Default` yields the zeroed report returned when no labels exist, so a UI
/// can always render something.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_negatives: usize,
}

/// Structured result of one feedback call.
///
/// Feedback is a recoverable, user-facing operation and must never abort the
/// review session, so logical failures (unknown device, missing features,
/// missing actual class) arrive here rather than as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackOutcome {
    pub success: bool,
    pub message: String,
    /// Deltas applied to the weight table, present on success.
    pub deltas: Option<BTreeMap<String, f64>>,
}

impl FeedbackOutcome {
    pub fn ok(message: impl Into<String>, deltas: BTreeMap<String, f64>) -> Self {
        Self {
            success: true,
            message: message.into(),
            deltas: Some(deltas),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            deltas: None,
        }
    }
}
