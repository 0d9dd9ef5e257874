//! Collaborator interfaces consumed by the orchestrator.
//!
//! Feature extraction, scoring, and statistical reporting live outside this
//! workspace; the engine only depends on these traits.

use std::collections::HashMap;
use std::path::Path;

use crate::class::DeviceClass;
use crate::errors::IvClassResult;
use crate::models::AccuracyReport;
use crate::prediction::Prediction;

/// Advisory progress callback: `(completed, total)`. A UI refresh hook, not a
/// cancellation token.
pub type ProgressFn<'a> = dyn Fn(usize, usize) + 'a;

/// The external batch processor turning measurement files into predictions.
pub trait BatchProcessor {
    /// Analyze every matching file under `dir`.
    fn process_directory(
        &self,
        dir: &Path,
        recursive: bool,
        pattern: &str,
        progress: Option<&ProgressFn<'_>>,
    ) -> IvClassResult<Vec<Prediction>>;

    /// Analyze a single file. `Ok(None)` means the file was skipped (e.g. it
    /// does not match the expected format).
    fn process_file(&self, path: &Path) -> IvClassResult<Option<Prediction>>;
}

/// Builds a batch processor bound to an explicit weight table.
///
/// The orchestrator constructs a fresh processor from the current weights
/// before every analysis pass, so scoring always reflects the latest tuning.
pub trait ProcessorFactory {
    fn for_weights(&self, weights: &HashMap<String, f64>) -> Box<dyn BatchProcessor>;
}

/// The external statistics calculator.
pub trait MetricsCalculator {
    fn calculate_accuracy(
        &self,
        predictions: &[Prediction],
        labels: &HashMap<String, DeviceClass>,
        target_class: DeviceClass,
    ) -> AccuracyReport;

    /// Predicted-class → actual-class → count.
    fn confusion_matrix(
        &self,
        predictions: &[Prediction],
        labels: &HashMap<String, DeviceClass>,
    ) -> HashMap<DeviceClass, HashMap<DeviceClass, usize>>;
}
