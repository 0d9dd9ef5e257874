//! The review-session orchestrator.
//!
//! Sole owner of the weight store, label store, adjuster, and the in-memory
//! prediction set. Feedback paths are uniformly non-throwing: the UI always
//! gets a [`FeedbackOutcome`] it can render, never an abort.
//!
//! Single-threaded contract: at most one in-flight mutating call. An
//! integrator running re-analysis on a background worker must serialize it
//! against feedback externally.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use ivclass_core::class::DeviceClass;
use ivclass_core::errors::IvClassResult;
use ivclass_core::models::{AccuracyReport, FeedbackOutcome};
use ivclass_core::prediction::Prediction;
use ivclass_core::traits::{MetricsCalculator, ProcessorFactory, ProgressFn};
use ivclass_core::AdjustmentRecord;

use crate::adjuster::WeightAdjuster;
use crate::label_store::LabelStore;
use crate::weight_store::WeightStore;

/// Owns the stores and drives the feedback loop.
pub struct ValidationOrchestrator {
    weights: WeightStore,
    labels: LabelStore,
    adjuster: WeightAdjuster,
    predictions: Vec<Prediction>,
    processor_factory: Box<dyn ProcessorFactory>,
    metrics: Box<dyn MetricsCalculator>,
    /// Remembered from the last `load_data` call, for re-analysis.
    data_dir: Option<PathBuf>,
    recursive: bool,
    pattern: String,
}

impl ValidationOrchestrator {
    /// Build an orchestrator over the two persisted stores. Both stores are
    /// loaded immediately (leniently — missing/corrupt files degrade to
    /// defaults/empty).
    pub fn new(
        weights_path: impl Into<PathBuf>,
        labels_path: impl Into<PathBuf>,
        processor_factory: Box<dyn ProcessorFactory>,
        metrics: Box<dyn MetricsCalculator>,
    ) -> Self {
        let mut weights = WeightStore::new(weights_path);
        weights.load();
        let mut labels = LabelStore::new(labels_path);
        labels.load();
        Self {
            weights,
            labels,
            adjuster: WeightAdjuster::new(),
            predictions: Vec::new(),
            processor_factory,
            metrics,
            data_dir: None,
            recursive: false,
            pattern: String::new(),
        }
    }

    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    /// First prediction with the given device id.
    pub fn get_prediction(&self, device_id: &str) -> Option<&Prediction> {
        self.predictions.iter().find(|p| p.device_id == device_id)
    }

    pub fn weight_store(&self) -> &WeightStore {
        &self.weights
    }

    pub fn weight_store_mut(&mut self) -> &mut WeightStore {
        &mut self.weights
    }

    pub fn label_store(&self) -> &LabelStore {
        &self.labels
    }

    pub fn label_store_mut(&mut self) -> &mut LabelStore {
        &mut self.labels
    }

    /// Analyze every matching file under `directory`, replacing the
    /// prediction set wholesale. The batch processor is constructed with the
    /// current weight table, so scoring reflects the latest tuning. Returns
    /// the number of predictions loaded.
    pub fn load_data(
        &mut self,
        directory: &Path,
        recursive: bool,
        pattern: &str,
        progress: Option<&ProgressFn<'_>>,
    ) -> IvClassResult<usize> {
        let processor = self.processor_factory.for_weights(&self.weights.get_weights());
        let predictions = processor.process_directory(directory, recursive, pattern, progress)?;
        info!(
            dir = %directory.display(),
            count = predictions.len(),
            "loaded prediction batch"
        );
        self.predictions = predictions;
        self.data_dir = Some(directory.to_path_buf());
        self.recursive = recursive;
        self.pattern = pattern.to_string();
        Ok(self.predictions.len())
    }

    /// Record one reviewer judgement and adjust weights accordingly.
    ///
    /// Locates the prediction (first match), dispatches to the adjuster, then
    /// re-scores that one device with the updated weights and replaces its
    /// prediction in place. `reanalyze_all` additionally reruns the whole
    /// batch (O(n), opt-in). Never panics or returns an error: every failure
    /// mode comes back as `success = false`.
    pub fn provide_feedback(
        &mut self,
        device_id: &str,
        is_correct: bool,
        actual_class: Option<&str>,
        reanalyze_all: bool,
    ) -> FeedbackOutcome {
        let Some(index) = self
            .predictions
            .iter()
            .position(|p| p.device_id == device_id)
        else {
            return FeedbackOutcome::fail(format!("no prediction found for device '{device_id}'"));
        };

        let Some(features) = self.predictions[index].features.clone() else {
            return FeedbackOutcome::fail(format!(
                "prediction for device '{device_id}' has no feature vector"
            ));
        };
        let Some(classification) = self.predictions[index].classification.clone() else {
            return FeedbackOutcome::fail(format!(
                "prediction for device '{device_id}' has no classification"
            ));
        };
        let predicted = classification.device_type;

        let adjusted = if is_correct {
            self.adjuster
                .adjust_for_correct(&mut self.weights, &features, predicted)
        } else {
            let Some(actual_raw) = actual_class else {
                return FeedbackOutcome::fail(
                    "actual_class is required when marking a prediction incorrect",
                );
            };
            let actual: DeviceClass = match actual_raw.parse() {
                Ok(class) => class,
                Err(_) => {
                    return FeedbackOutcome::fail(format!(
                        "'{actual_raw}' is not a recognized device class"
                    ));
                }
            };
            self.adjuster
                .adjust_for_incorrect(&mut self.weights, &features, predicted, actual)
        };

        let deltas = match adjusted {
            Ok(deltas) => deltas,
            Err(e) => {
                warn!(device_id = %device_id, error = %e, "weight adjustment failed");
                return FeedbackOutcome::fail(format!("weight adjustment failed: {e}"));
            }
        };

        let mut message = format!(
            "adjusted {} weight(s) for device '{device_id}'",
            deltas.len()
        );
        if let Err(e) = self.rescore_device(index) {
            warn!(device_id = %device_id, error = %e, "single-device re-analysis failed");
            message.push_str("; re-analysis failed, prediction left unchanged");
        }
        if reanalyze_all {
            if let Err(e) = self.reanalyze_all_devices(None) {
                warn!(error = %e, "full re-analysis after feedback failed");
                message.push_str("; full re-analysis failed");
            }
        }
        FeedbackOutcome::ok(message, deltas)
    }

    /// Re-score every loaded device with the current weights, replacing the
    /// prediction set. Returns the number of non-error analyses.
    pub fn reanalyze_all_devices(
        &mut self,
        progress: Option<&ProgressFn<'_>>,
    ) -> IvClassResult<usize> {
        let processor = self.processor_factory.for_weights(&self.weights.get_weights());
        let predictions = match &self.data_dir {
            Some(dir) => {
                processor.process_directory(dir, self.recursive, &self.pattern, progress)?
            }
            None => {
                // No batch directory remembered; re-score the loaded files
                // one by one, keeping the old prediction where re-analysis
                // yields nothing.
                let total = self.predictions.len();
                let mut replaced = Vec::with_capacity(total);
                for (i, old) in self.predictions.iter().enumerate() {
                    match processor.process_file(&old.file_path) {
                        Ok(Some(fresh)) => replaced.push(fresh),
                        Ok(None) => replaced.push(old.clone()),
                        Err(e) => {
                            warn!(path = %old.file_path.display(), error = %e, "re-analysis failed for file");
                            replaced.push(old.clone());
                        }
                    }
                    if let Some(cb) = progress {
                        cb(i + 1, total);
                    }
                }
                replaced
            }
        };
        self.predictions = predictions;
        let ok = self.predictions.iter().filter(|p| p.is_ok()).count();
        info!(total = self.predictions.len(), ok, "re-analyzed all devices");
        Ok(ok)
    }

    /// Session adjustment history, oldest first.
    pub fn get_weight_adjustment_history(&self) -> &[AdjustmentRecord] {
        self.adjuster.history()
    }

    /// Reverse the most recent adjustment. Returns `false` when there is
    /// nothing to undo or the undo could not be applied; never throws.
    pub fn undo_last_weight_adjustment(&mut self) -> bool {
        match self.adjuster.undo_last_adjustment(&mut self.weights) {
            Ok(undone) => undone,
            Err(e) => {
                warn!(error = %e, "undo failed");
                false
            }
        }
    }

    /// Flush the weight/threshold tables to disk.
    pub fn save_weights(&self) -> IvClassResult<()> {
        self.weights.save()
    }

    /// Replace the weight/threshold tables with compiled defaults and persist
    /// immediately.
    pub fn reset_weights_to_defaults(&mut self) -> IvClassResult<()> {
        self.weights.reset_to_defaults()
    }

    /// Accuracy metrics for one target class, delegated to the external
    /// calculator. With no labels recorded, returns a zeroed report so a UI
    /// can always render something.
    pub fn get_metrics(&self, target_class: DeviceClass) -> AccuracyReport {
        if self.labels.get_labeled_count() == 0 {
            return AccuracyReport::default();
        }
        self.metrics
            .calculate_accuracy(&self.predictions, &self.labels.get_all_labels(), target_class)
    }

    /// Full confusion matrix, delegated to the external calculator.
    pub fn get_confusion_matrix(&self) -> HashMap<DeviceClass, HashMap<DeviceClass, usize>> {
        self.metrics
            .confusion_matrix(&self.predictions, &self.labels.get_all_labels())
    }

    /// Re-run analysis for the prediction at `index` with current weights and
    /// replace it in place. Keeps the old prediction when the processor
    /// yields nothing.
    fn rescore_device(&mut self, index: usize) -> IvClassResult<()> {
        let path = self.predictions[index].file_path.clone();
        let processor = self.processor_factory.for_weights(&self.weights.get_weights());
        if let Some(fresh) = processor.process_file(&path)? {
            self.predictions[index] = fresh;
        }
        Ok(())
    }
}
