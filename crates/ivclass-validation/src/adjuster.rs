//! Feedback-driven weight adjustment with exact undo.
//!
//! Each feedback event becomes a set of signed deltas, applied to the weight
//! store and recorded in an append-only session history. Contribution is
//! direction-only: the step is always the current learning rate (halved for
//! reinforcement), never scaled by feature magnitude, which keeps every
//! adjustment exactly undoable.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{info, warn};

use ivclass_core::adjustment::{AdjustmentKind, AdjustmentRecord};
use ivclass_core::class::DeviceClass;
use ivclass_core::errors::{IvClassError, IvClassResult};
use ivclass_core::feature::FeatureVector;

use crate::feature_map;
use crate::weight_store::WeightStore;

/// Reinforcement runs at half the correction strength, to resist
/// over-fitting on agreement.
const REINFORCEMENT_FACTOR: f64 = 0.5;

/// Turns feedback events into applied, recorded, undoable weight deltas.
///
/// The history is session-scoped: it is not persisted across restarts.
#[derive(Debug, Default)]
pub struct WeightAdjuster {
    history: Vec<AdjustmentRecord>,
}

impl WeightAdjuster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session adjustment history, oldest first.
    pub fn history(&self) -> &[AdjustmentRecord] {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Drop the session history without touching any weights.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Reinforce the rules that produced a confirmed-correct prediction.
    ///
    /// Every fired feature in the predicted class's contribution map gets
    /// `+learning_rate / 2` on its weight key. Returns the applied deltas.
    pub fn adjust_for_correct(
        &mut self,
        store: &mut WeightStore,
        features: &FeatureVector,
        predicted_class: DeviceClass,
    ) -> IvClassResult<BTreeMap<String, f64>> {
        let step = store.get_learning_rate() * REINFORCEMENT_FACTOR;
        let mut deltas: BTreeMap<String, f64> = BTreeMap::new();
        for (feature, key) in feature_map::contributions(predicted_class) {
            if features.is_active(feature) {
                deltas.insert((*key).to_string(), step);
            }
        }
        self.apply(
            store,
            AdjustmentKind::Correct,
            predicted_class,
            predicted_class,
            deltas,
        )
    }

    /// Penalize the rules behind a wrong prediction and reward the rules of
    /// the class the reviewer says is right.
    ///
    /// Fired features of `predicted_class` get `-learning_rate`; fired
    /// features of `actual_class` get `+learning_rate`. A weight key touched
    /// by both sides combines algebraically — one rule firing for both
    /// classes is combined evidence, not a conflict.
    pub fn adjust_for_incorrect(
        &mut self,
        store: &mut WeightStore,
        features: &FeatureVector,
        predicted_class: DeviceClass,
        actual_class: DeviceClass,
    ) -> IvClassResult<BTreeMap<String, f64>> {
        let step = store.get_learning_rate();
        let mut deltas: BTreeMap<String, f64> = BTreeMap::new();
        for (feature, key) in feature_map::contributions(predicted_class) {
            if features.is_active(feature) {
                *deltas.entry((*key).to_string()).or_insert(0.0) -= step;
            }
        }
        for (feature, key) in feature_map::contributions(actual_class) {
            if features.is_active(feature) {
                *deltas.entry((*key).to_string()).or_insert(0.0) += step;
            }
        }
        self.apply(
            store,
            AdjustmentKind::Incorrect,
            predicted_class,
            actual_class,
            deltas,
        )
    }

    /// Reverse the most recent adjustment by applying its negated deltas.
    ///
    /// Returns `false` when the history is empty. Exactness assumes no other
    /// mutation touched the same keys since the adjustment was recorded.
    /// A failed persist reinstates both the deltas and the record, so an
    /// `Err` means nothing was undone.
    pub fn undo_last_adjustment(&mut self, store: &mut WeightStore) -> IvClassResult<bool> {
        let Some(record) = self.history.pop() else {
            return Ok(false);
        };
        for (key, delta) in &record.deltas {
            if let Err(e) = store.adjust_weight(key, -delta) {
                match e {
                    IvClassError::UnknownWeight { .. } => {
                        warn!(key = %key, "skipping unknown weight key during undo");
                    }
                    other => return Err(other),
                }
            }
        }
        if let Err(e) = store.save() {
            for (key, delta) in &record.deltas {
                let _ = store.adjust_weight(key, *delta);
            }
            self.history.push(record);
            return Err(e);
        }
        info!(
            kind = ?record.kind,
            keys = record.deltas.len(),
            "undid last weight adjustment"
        );
        Ok(true)
    }

    fn apply(
        &mut self,
        store: &mut WeightStore,
        kind: AdjustmentKind,
        predicted_class: DeviceClass,
        actual_class: DeviceClass,
        deltas: BTreeMap<String, f64>,
    ) -> IvClassResult<BTreeMap<String, f64>> {
        for (key, delta) in &deltas {
            if let Err(e) = store.adjust_weight(key, *delta) {
                match e {
                    IvClassError::UnknownWeight { .. } => {
                        warn!(key = %key, "skipping unknown weight key during adjustment");
                    }
                    other => return Err(other),
                }
            }
        }
        if let Err(e) = store.save() {
            // Back out the deltas: a feedback event that cannot be persisted
            // must leave table and history unchanged.
            for (key, delta) in &deltas {
                let _ = store.adjust_weight(key, -delta);
            }
            return Err(e);
        }
        info!(
            kind = ?kind,
            predicted = %predicted_class,
            actual = %actual_class,
            keys = deltas.len(),
            "applied weight adjustment"
        );
        self.history.push(AdjustmentRecord {
            kind,
            predicted_class,
            actual_class,
            deltas: deltas.clone(),
            recorded_at: Utc::now(),
        });
        Ok(deltas)
    }
}
