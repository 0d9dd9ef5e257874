//! # ivclass-validation
//!
//! Adaptive rule-weight classification validation. A reviewer compares
//! machine-predicted device classes against expert judgement; every
//! agree/disagree decision nudges the scoring-rule weights so future
//! predictions converge toward the reviewer, with an append-only adjustment
//! history supporting exact undo.
//!
//! ## Components
//! - [`WeightStore`] — persisted weight/threshold tables with validated
//!   mutation (strict single-key, lenient bulk)
//! - [`LabelStore`] — persisted ground-truth labels with a validated class set
//! - [`feature_map`] — static class → (feature, weight-key) contribution table
//! - [`WeightAdjuster`] — feedback → signed deltas → applied + recorded,
//!   exactly undoable
//! - [`ValidationOrchestrator`] — owns the stores and the prediction set,
//!   drives feedback, re-analysis, and metrics retrieval
//!
//! Deliberately not a statistical learner: no gradient descent, no
//! convergence guarantee, just an auditable linearly-additive rule.

pub mod adjuster;
pub mod feature_map;
pub mod label_store;
pub mod orchestrator;
pub mod weight_store;

pub use adjuster::WeightAdjuster;
pub use label_store::LabelStore;
pub use orchestrator::ValidationOrchestrator;
pub use weight_store::WeightStore;
