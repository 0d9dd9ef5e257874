//! Error types for the validation engine.
//!
//! Strict single-item mutations surface these as hard errors; lenient bulk
//! paths log and skip instead. Feedback-path failures are never expressed as
//! errors — they travel as [`crate::models::FeedbackOutcome`] values.

/// Result alias used across the workspace.
pub type IvClassResult<T> = Result<T, IvClassError>;

#[derive(Debug, thiserror::Error)]
pub enum IvClassError {
    #[error("unknown weight key: {name}")]
    UnknownWeight { name: String },

    #[error("unknown threshold key: {name}")]
    UnknownThreshold { name: String },

    #[error("weight value for {name} is not finite: {value}")]
    NonFiniteValue { name: String, value: f64 },

    #[error("invalid device label: {value}")]
    InvalidLabel { value: String },

    #[error("learning rate must be positive and finite, got {rate}")]
    InvalidLearningRate { rate: f64 },

    #[error("batch processing failed: {message}")]
    Processing { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
