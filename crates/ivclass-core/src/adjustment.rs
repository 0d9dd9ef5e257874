//! Append-only history entries for weight adjustments.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::class::DeviceClass;

/// What kind of feedback produced an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    Correct,
    Incorrect,
}

/// One feedback event's exact effect on the weight table.
///
/// Immutable once recorded. Deltas are signed and keyed by weight name; a
/// `BTreeMap` keeps apply/undo order deterministic so identical feedback
/// sequences reach identical weight states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentRecord {
    pub kind: AdjustmentKind,
    pub predicted_class: DeviceClass,
    pub actual_class: DeviceClass,
    pub deltas: BTreeMap<String, f64>,
    pub recorded_at: DateTime<Utc>,
}
