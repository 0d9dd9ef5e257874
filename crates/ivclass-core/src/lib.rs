//! # ivclass-core
//!
//! Foundation crate for the ivclass classification-validation engine.
//! Defines device classes, feature vectors, predictions, adjustment records,
//! compiled default weight/threshold tables, errors, and the collaborator
//! traits (batch processor, metrics calculator).
//! Every other crate in the workspace depends on this.

pub mod adjustment;
pub mod class;
pub mod defaults;
pub mod errors;
pub mod feature;
pub mod models;
pub mod prediction;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use adjustment::{AdjustmentKind, AdjustmentRecord};
pub use class::DeviceClass;
pub use errors::{IvClassError, IvClassResult};
pub use feature::{FeatureValue, FeatureVector};
pub use models::{AccuracyReport, FeedbackOutcome};
pub use prediction::{Classification, Prediction};
